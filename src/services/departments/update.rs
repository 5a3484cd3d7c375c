use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DepartmentService;
use crate::models::{ApiResponse, ErrorCode, departments::requests::UpdateDepartmentRequest};
use crate::services::{invalid, not_found, storage_error_response};
use crate::utils::validate::{validate_code, validate_name};

pub async fn update_department(
    service: &DepartmentService,
    request: &HttpRequest,
    department_id: i64,
    mut update_data: UpdateDepartmentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    if let Some(code) = update_data.code.as_deref()
        && let Err(msg) = validate_code(code)
    {
        return Ok(invalid(ErrorCode::DepartmentCodeInvalid, msg));
    }
    if let Some(name) = update_data.name.as_deref() {
        if let Err(msg) = validate_name(name) {
            return Ok(invalid(ErrorCode::ValidationFailed, msg));
        }
        update_data.name = Some(name.trim().to_string());
    }

    match storage.update_department(department_id, update_data).await {
        Ok(Some(department)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            department,
            "Department updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::DepartmentNotFound, "Department not found")),
        Err(e) if e.is_conflict() => Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::DepartmentAlreadyExists,
            "Department code already exists",
        ))),
        Err(e) => Ok(storage_error_response("Department update failed", &e)),
    }
}
