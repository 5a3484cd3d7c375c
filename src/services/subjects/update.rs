use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubjectService;
use crate::models::{ApiResponse, ErrorCode, subjects::requests::UpdateSubjectRequest};
use crate::services::{invalid, not_found, storage_error_response};
use crate::utils::validate::{validate_code, validate_name};

pub async fn update_subject(
    service: &SubjectService,
    request: &HttpRequest,
    subject_id: i64,
    mut update_data: UpdateSubjectRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    if let Some(code) = update_data.code.as_deref()
        && let Err(msg) = validate_code(code)
    {
        return Ok(invalid(ErrorCode::SubjectCodeInvalid, msg));
    }
    if let Some(name) = update_data.name.as_deref() {
        if let Err(msg) = validate_name(name) {
            return Ok(invalid(ErrorCode::ValidationFailed, msg));
        }
        update_data.name = Some(name.trim().to_string());
    }

    // 转移院系时目标院系必须存在
    if let Some(department_id) = update_data.department_id {
        match storage.get_department_by_id(department_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(not_found(ErrorCode::DepartmentNotFound, "Department not found"));
            }
            Err(e) => return Ok(storage_error_response("Subject update failed", &e)),
        }
    }

    match storage.update_subject(subject_id, update_data).await {
        Ok(Some(subject)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            subject,
            "Subject updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::SubjectNotFound, "Subject not found")),
        Err(e) if e.is_conflict() => Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::SubjectAlreadyExists,
            "Subject code already exists",
        ))),
        Err(e) => Ok(storage_error_response("Subject update failed", &e)),
    }
}
