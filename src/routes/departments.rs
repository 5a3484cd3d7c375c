use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::departments::requests::{
    CreateDepartmentRequest, DepartmentListParams, UpdateDepartmentRequest,
};
use crate::services::DepartmentService;
use crate::utils::SafeDepartmentIdI64;

static DEPARTMENT_SERVICE: Lazy<DepartmentService> = Lazy::new(DepartmentService::new_lazy);

pub async fn list_departments(
    req: HttpRequest,
    query: web::Query<DepartmentListParams>,
) -> ActixResult<HttpResponse> {
    DEPARTMENT_SERVICE
        .list_departments(&req, query.into_inner())
        .await
}

pub async fn create_department(
    req: HttpRequest,
    department_data: web::Json<CreateDepartmentRequest>,
) -> ActixResult<HttpResponse> {
    DEPARTMENT_SERVICE
        .create_department(&req, department_data.into_inner())
        .await
}

pub async fn get_department(
    req: HttpRequest,
    department_id: SafeDepartmentIdI64,
) -> ActixResult<HttpResponse> {
    DEPARTMENT_SERVICE.get_department(&req, department_id.0).await
}

pub async fn update_department(
    req: HttpRequest,
    department_id: SafeDepartmentIdI64,
    update_data: web::Json<UpdateDepartmentRequest>,
) -> ActixResult<HttpResponse> {
    DEPARTMENT_SERVICE
        .update_department(&req, department_id.0, update_data.into_inner())
        .await
}

pub async fn delete_department(
    req: HttpRequest,
    department_id: SafeDepartmentIdI64,
) -> ActixResult<HttpResponse> {
    DEPARTMENT_SERVICE
        .delete_department(&req, department_id.0)
        .await
}

// 配置路由
pub fn configure_departments_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/departments")
            .service(
                web::resource("")
                    .route(web::get().to(list_departments))
                    .route(web::post().to(create_department)),
            )
            .service(
                web::resource("/{department_id}")
                    .route(web::get().to(get_department))
                    .route(web::put().to(update_department))
                    .route(web::delete().to(delete_department)),
            ),
    );
}
