use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::users::requests::{CreateUserRequest, UpdateUserRequest, UserListParams};
use crate::services::UserService;

// 懒加载的全局 USER_SERVICE 实例
static USER_SERVICE: Lazy<UserService> = Lazy::new(UserService::new_lazy);

// HTTP处理程序
pub async fn list_users(
    req: HttpRequest,
    query: web::Query<UserListParams>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE.list_users(&req, query.into_inner()).await
}

pub async fn create_user(
    req: HttpRequest,
    user_data: web::Json<CreateUserRequest>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE.create_user(&req, user_data.into_inner()).await
}

pub async fn get_user(req: HttpRequest, user_id: web::Path<String>) -> ActixResult<HttpResponse> {
    USER_SERVICE.get_user(&req, user_id.into_inner()).await
}

pub async fn update_user(
    req: HttpRequest,
    user_id: web::Path<String>,
    update_data: web::Json<UpdateUserRequest>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE
        .update_user(&req, user_id.into_inner(), update_data.into_inner())
        .await
}

pub async fn delete_user(
    req: HttpRequest,
    user_id: web::Path<String>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE.delete_user(&req, user_id.into_inner()).await
}

// 配置路由
pub fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/users")
            .service(
                web::resource("")
                    .route(web::get().to(list_users))
                    .route(web::post().to(create_user)),
            )
            .service(
                web::resource("/{user_id}")
                    .route(web::get().to(get_user))
                    .route(web::put().to(update_user))
                    .route(web::delete().to(delete_user)),
            ),
    );
}
