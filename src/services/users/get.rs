use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{not_found, storage_error_response};

pub async fn get_user(
    service: &UserService,
    request: &HttpRequest,
    user_id: String,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_user_by_id(&user_id).await {
        Ok(Some(user)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            user,
            "User information retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::UserNotFound, "User not found")),
        Err(e) => Ok(storage_error_response("Failed to retrieve user", &e)),
    }
}
