use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::DepartmentService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{not_found, storage_error_response};

pub async fn delete_department(
    service: &DepartmentService,
    request: &HttpRequest,
    department_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    // 仍有科目引用的院系不能删除
    match storage.count_subjects_in_department(department_id).await {
        Ok(0) => {}
        Ok(count) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::DepartmentHasSubjects,
                format!("Department still has {count} subject(s)"),
            )));
        }
        Err(e) => return Ok(storage_error_response("Department deletion failed", &e)),
    }

    match storage.delete_department(department_id).await {
        Ok(true) => {
            info!("Department {} deleted", department_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Department deleted successfully",
            )))
        }
        Ok(false) => Ok(not_found(ErrorCode::DepartmentNotFound, "Department not found")),
        Err(e) => Ok(storage_error_response("Department deletion failed", &e)),
    }
}
