use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::UserService;
use crate::models::{ApiResponse, ErrorCode, users::requests::CreateUserRequest};
use crate::services::{invalid, storage_error_response};
use crate::utils::validate::{validate_email, validate_name};

pub async fn create_user(
    service: &UserService,
    request: &HttpRequest,
    mut user_data: CreateUserRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    if let Err(msg) = validate_name(&user_data.name) {
        return Ok(invalid(ErrorCode::UserNameInvalid, msg));
    }
    if let Err(msg) = validate_email(&user_data.email) {
        return Ok(invalid(ErrorCode::UserEmailInvalid, msg));
    }
    user_data.name = user_data.name.trim().to_string();

    match storage.create_user(user_data).await {
        Ok(user) => {
            info!("User {} ({}) created", user.id, user.role);
            Ok(HttpResponse::Created().json(ApiResponse::success(user, "User created successfully")))
        }
        Err(e) if e.is_conflict() => Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::UserAlreadyExists,
            "User id or email already exists",
        ))),
        Err(e) => Ok(storage_error_response("User creation failed", &e)),
    }
}
