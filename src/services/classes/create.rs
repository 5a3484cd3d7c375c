use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::{ClassService, invite_code::allocation_error_response};
use crate::models::classes::requests::CreateClassRequest;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{invalid, not_found, storage_error_response};
use crate::storage::Storage;
use crate::utils::validate::validate_name;

pub async fn create_class(
    service: &ClassService,
    request: &HttpRequest,
    mut class_data: CreateClassRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    if let Err(msg) = validate_name(&class_data.name) {
        return Ok(invalid(ErrorCode::ValidationFailed, msg));
    }
    if class_data.capacity <= 0 {
        return Ok(invalid(
            ErrorCode::ClassCapacityInvalid,
            "Capacity must be greater than 0",
        ));
    }
    class_data.name = class_data.name.trim().to_string();

    if let Err(resp) = check_subject(&storage, class_data.subject_id).await {
        return Ok(resp);
    }
    if let Err(resp) = check_teacher(&storage, &class_data.teacher_id).await {
        return Ok(resp);
    }

    let invite_code = match service.allocator(storage.clone()).allocate_unique().await {
        Ok(code) => code,
        Err(e) => return Ok(allocation_error_response(&e)),
    };

    match storage.create_class(class_data, invite_code).await {
        Ok(class) => {
            info!(
                "Class {} created with invite code {}",
                class.id, class.invite_code
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(class, "Class created successfully")))
        }
        // 分配后被并发请求抢占的邀请码由唯一约束拦截
        Err(e) if e.is_conflict() => {
            warn!("Class creation hit a unique constraint: {}", e);
            Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::ClassCreationFailed,
                "Invite code was taken concurrently, please retry",
            )))
        }
        Err(e) => Ok(storage_error_response("Class creation failed", &e)),
    }
}

/// 科目必须存在
pub(crate) async fn check_subject(
    storage: &Arc<dyn Storage>,
    subject_id: i64,
) -> Result<(), HttpResponse> {
    match storage.get_subject_by_id(subject_id).await {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(not_found(ErrorCode::SubjectNotFound, "Subject not found")),
        Err(e) => Err(storage_error_response("Failed to load subject", &e)),
    }
}

/// 授课人必须存在且为教师
pub(crate) async fn check_teacher(
    storage: &Arc<dyn Storage>,
    teacher_id: &str,
) -> Result<(), HttpResponse> {
    match storage.get_user_by_id(teacher_id).await {
        Ok(Some(user)) if user.role == UserRole::Teacher => Ok(()),
        Ok(Some(_)) => Err(invalid(
            ErrorCode::ClassTeacherInvalid,
            "Assigned user is not a teacher",
        )),
        Ok(None) => Err(not_found(ErrorCode::ClassTeacherInvalid, "Teacher not found")),
        Err(e) => Err(storage_error_response("Failed to load teacher", &e)),
    }
}
