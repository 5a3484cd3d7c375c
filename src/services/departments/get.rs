use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DepartmentService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{not_found, storage_error_response};

pub async fn get_department(
    service: &DepartmentService,
    request: &HttpRequest,
    department_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_department_by_id(department_id).await {
        Ok(Some(department)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            department,
            "Department retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::DepartmentNotFound, "Department not found")),
        Err(e) => Ok(storage_error_response("Failed to retrieve department", &e)),
    }
}
