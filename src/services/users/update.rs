use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::models::{ApiResponse, ErrorCode, users::requests::UpdateUserRequest};
use crate::services::{invalid, not_found, storage_error_response};
use crate::utils::validate::{validate_email, validate_name};

pub async fn update_user(
    service: &UserService,
    request: &HttpRequest,
    user_id: String,
    mut update_data: UpdateUserRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    if let Some(name) = update_data.name.as_deref() {
        if let Err(msg) = validate_name(name) {
            return Ok(invalid(ErrorCode::UserNameInvalid, msg));
        }
        update_data.name = Some(name.trim().to_string());
    }
    if let Some(email) = update_data.email.as_deref()
        && let Err(msg) = validate_email(email)
    {
        return Ok(invalid(ErrorCode::UserEmailInvalid, msg));
    }

    match storage.update_user(&user_id, update_data).await {
        Ok(Some(user)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            user,
            "User information updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::UserNotFound, "User not found")),
        Err(e) if e.is_conflict() => Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::UserAlreadyExists,
            "Email already in use",
        ))),
        Err(e) => Ok(storage_error_response("Failed to update user information", &e)),
    }
}
