use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{not_found, storage_error_response};

pub async fn get_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_class_by_id(class_id).await {
        Ok(Some(class)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            class,
            "Class information retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::ClassNotFound, "Class not found")),
        Err(e) => Ok(storage_error_response("Failed to retrieve class information", &e)),
    }
}

pub async fn get_class_by_code(
    service: &ClassService,
    request: &HttpRequest,
    code: String,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_class_by_code(code.trim()).await {
        Ok(Some(class)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            class,
            "Class information retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::ClassInviteCodeInvalid, "Invite code not found")),
        Err(e) => Ok(storage_error_response("Failed to retrieve class information", &e)),
    }
}
