use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::UserService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{not_found, storage_error_response};

pub async fn delete_user(
    service: &UserService,
    request: &HttpRequest,
    user_id: String,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.count_classes_taught(&user_id).await {
        Ok(0) => {}
        Ok(count) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::UserInUse,
                format!("User still teaches {count} class(es)"),
            )));
        }
        Err(e) => return Ok(storage_error_response("User deletion failed", &e)),
    }

    match storage.delete_user(&user_id).await {
        Ok(true) => {
            info!("User {} deleted", user_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("User deleted successfully")))
        }
        Ok(false) => Ok(not_found(ErrorCode::UserNotFound, "User not found")),
        Err(e) => Ok(storage_error_response("User deletion failed", &e)),
    }
}
