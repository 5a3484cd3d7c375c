use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ClassService;
use crate::errors::CampusError;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{not_found, storage_error_response};

pub async fn delete_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    // 已有学生选课的班级不能删除
    match storage.count_enrollments(class_id).await {
        Ok(0) => {}
        Ok(count) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::ClassHasEnrollments,
                format!("Class still has {count} enrollment(s)"),
            )));
        }
        Err(e) => return Ok(storage_error_response("Class deletion failed", &e)),
    }

    match storage.delete_class(class_id).await {
        Ok(true) => {
            info!("Class {} deleted", class_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Class deleted successfully")))
        }
        Ok(false) => Ok(not_found(ErrorCode::ClassNotFound, "Class not found")),
        // 计数之后才提交的选课记录由外键约束拦截
        Err(CampusError::Validation(detail)) => {
            info!("Class {} deletion blocked by enrollments: {}", class_id, detail);
            Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::ClassHasEnrollments,
                "Class still has enrollments",
            )))
        }
        Err(e) => Ok(storage_error_response("Class deletion failed", &e)),
    }
}
