use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::classes::requests::{ClassQueryParams, CreateClassRequest, UpdateClassRequest};
use crate::services::ClassService;
use crate::utils::SafeClassIdI64;

// 懒加载的全局 CLASS_SERVICE 实例
static CLASS_SERVICE: Lazy<ClassService> = Lazy::new(ClassService::new_lazy);

// HTTP处理程序
pub async fn list_classes(
    req: HttpRequest,
    query: web::Query<ClassQueryParams>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.list_classes(&req, query.into_inner()).await
}

pub async fn create_class(
    req: HttpRequest,
    class_data: web::Json<CreateClassRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .create_class(&req, class_data.into_inner())
        .await
}

pub async fn get_class_by_code(
    req: HttpRequest,
    code: web::Path<String>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .get_class_by_code(&req, code.into_inner())
        .await
}

pub async fn get_class(req: HttpRequest, class_id: SafeClassIdI64) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.get_class(&req, class_id.0).await
}

pub async fn update_class(
    req: HttpRequest,
    class_id: SafeClassIdI64,
    update_data: web::Json<UpdateClassRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .update_class(&req, class_id.0, update_data.into_inner())
        .await
}

pub async fn regenerate_invite_code(
    req: HttpRequest,
    class_id: SafeClassIdI64,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.regenerate_invite_code(&req, class_id.0).await
}

pub async fn delete_class(req: HttpRequest, class_id: SafeClassIdI64) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.delete_class(&req, class_id.0).await
}

// 配置路由
pub fn configure_classes_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/classes")
            .service(
                web::resource("")
                    .route(web::get().to(list_classes))
                    .route(web::post().to(create_class)),
            )
            // 需在 /{class_id} 之前注册
            .service(web::resource("/code/{code}").route(web::get().to(get_class_by_code)))
            .service(
                web::resource("/{class_id}")
                    .route(web::get().to(get_class))
                    .route(web::put().to(update_class))
                    .route(web::delete().to(delete_class)),
            )
            .service(
                web::resource("/{class_id}/invite-code")
                    .route(web::post().to(regenerate_invite_code)),
            ),
    );
}
