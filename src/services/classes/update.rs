use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{
    ClassService,
    create::{check_subject, check_teacher},
};
use crate::models::{ApiResponse, ErrorCode, classes::requests::UpdateClassRequest};
use crate::services::{invalid, not_found, storage_error_response};
use crate::utils::validate::validate_name;

pub async fn update_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
    mut update_data: UpdateClassRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    if let Some(name) = update_data.name.as_deref() {
        if let Err(msg) = validate_name(name) {
            return Ok(invalid(ErrorCode::ValidationFailed, msg));
        }
        update_data.name = Some(name.trim().to_string());
    }
    if let Some(capacity) = update_data.capacity
        && capacity <= 0
    {
        return Ok(invalid(
            ErrorCode::ClassCapacityInvalid,
            "Capacity must be greater than 0",
        ));
    }
    if let Some(subject_id) = update_data.subject_id
        && let Err(resp) = check_subject(&storage, subject_id).await
    {
        return Ok(resp);
    }
    if let Some(teacher_id) = update_data.teacher_id.as_deref()
        && let Err(resp) = check_teacher(&storage, teacher_id).await
    {
        return Ok(resp);
    }

    match storage.update_class(class_id, update_data).await {
        Ok(Some(class)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            class,
            "Class information updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::ClassNotFound, "Class not found")),
        Err(e) => Ok(storage_error_response("Class update failed", &e)),
    }
}
