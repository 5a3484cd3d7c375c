use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::ClassService;
use crate::domain::AllocationError;
use crate::models::{ApiResponse, ErrorCode, classes::responses::InviteCodeResponse};
use crate::services::{not_found, storage_error_response};

/// 邀请码分配失败的响应
pub(crate) fn allocation_error_response(err: &AllocationError) -> HttpResponse {
    match err {
        AllocationError::Exhausted { attempts } => {
            error!("Invite code allocation exhausted after {} attempts", attempts);
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InviteCodeExhausted,
                format!("Could not allocate a unique invite code after {attempts} attempts"),
            ))
        }
        AllocationError::StorageUnavailable(detail) => {
            error!("Invite code allocation failed: {}", detail);
            HttpResponse::ServiceUnavailable().json(ApiResponse::error_empty(
                ErrorCode::ServiceUnavailable,
                "Storage unavailable, please retry later",
            ))
        }
    }
}

pub async fn regenerate_invite_code(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_class_by_id(class_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found(ErrorCode::ClassNotFound, "Class not found")),
        Err(e) => return Ok(storage_error_response("Invite code update failed", &e)),
    }

    let code = match service.allocator(storage.clone()).allocate_unique().await {
        Ok(code) => code,
        Err(e) => return Ok(allocation_error_response(&e)),
    };

    match storage.set_class_invite_code(class_id, code).await {
        Ok(Some(class)) => {
            info!("Class {} invite code regenerated", class.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                InviteCodeResponse {
                    code: class.invite_code,
                },
                "Invite code regenerated successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::ClassNotFound, "Class not found")),
        Err(e) => Ok(storage_error_response("Invite code update failed", &e)),
    }
}
