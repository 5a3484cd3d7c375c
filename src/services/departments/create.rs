use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::DepartmentService;
use crate::models::{ApiResponse, ErrorCode, departments::requests::CreateDepartmentRequest};
use crate::services::{invalid, storage_error_response};
use crate::utils::validate::{validate_code, validate_name};

pub async fn create_department(
    service: &DepartmentService,
    request: &HttpRequest,
    mut department_data: CreateDepartmentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    if let Err(msg) = validate_code(&department_data.code) {
        return Ok(invalid(ErrorCode::DepartmentCodeInvalid, msg));
    }
    if let Err(msg) = validate_name(&department_data.name) {
        return Ok(invalid(ErrorCode::ValidationFailed, msg));
    }
    department_data.name = department_data.name.trim().to_string();

    match storage.create_department(department_data).await {
        Ok(department) => {
            info!("Department {} created", department.code);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                department,
                "Department created successfully",
            )))
        }
        Err(e) if e.is_conflict() => Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::DepartmentAlreadyExists,
            "Department code already exists",
        ))),
        Err(e) => Ok(storage_error_response("Department creation failed", &e)),
    }
}
