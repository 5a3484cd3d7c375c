use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SubjectService;
use crate::models::{ApiResponse, ErrorCode, subjects::requests::CreateSubjectRequest};
use crate::services::{invalid, not_found, storage_error_response};
use crate::utils::validate::{validate_code, validate_name};

pub async fn create_subject(
    service: &SubjectService,
    request: &HttpRequest,
    mut subject_data: CreateSubjectRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    if let Err(msg) = validate_code(&subject_data.code) {
        return Ok(invalid(ErrorCode::SubjectCodeInvalid, msg));
    }
    if let Err(msg) = validate_name(&subject_data.name) {
        return Ok(invalid(ErrorCode::ValidationFailed, msg));
    }
    subject_data.name = subject_data.name.trim().to_string();

    match storage.get_department_by_id(subject_data.department_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found(ErrorCode::DepartmentNotFound, "Department not found")),
        Err(e) => return Ok(storage_error_response("Subject creation failed", &e)),
    }

    match storage.create_subject(subject_data).await {
        Ok(subject) => {
            info!(
                "Subject {} created in department {}",
                subject.code, subject.department_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                subject,
                "Subject created successfully",
            )))
        }
        Err(e) if e.is_conflict() => Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::SubjectAlreadyExists,
            "Subject code already exists",
        ))),
        Err(e) => Ok(storage_error_response("Subject creation failed", &e)),
    }
}
