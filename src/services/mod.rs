pub mod classes;
pub mod departments;
pub mod enrollments;
pub mod stats;
pub mod subjects;
pub mod system;
pub mod users;

pub use classes::ClassService;
pub use departments::DepartmentService;
pub use enrollments::EnrollmentService;
pub use stats::StatsService;
pub use subjects::SubjectService;
pub use system::SystemService;
pub use users::UserService;

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use tracing::error;

use crate::errors::CampusError;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

/// 从 app_data 中取出存储实例
pub(crate) fn storage_from_request(request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
    request
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("Storage not found in app data"))
}

/// 存储层错误转换为响应
///
/// 约束冲突 -> 409，外键等数据校验失败 -> 400，其余 -> 500。
pub(crate) fn storage_error_response(context: &str, err: &CampusError) -> HttpResponse {
    match err {
        CampusError::Conflict(_) => HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::Conflict,
            format!("{context}: {}", err.message()),
        )),
        CampusError::Validation(_) => HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            format!("{context}: {}", err.message()),
        )),
        _ => {
            error!("{}: {}", context, err);
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("{context}: {}", err.message()),
            ))
        }
    }
}

/// 参数校验失败
pub(crate) fn invalid(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(code, message))
}

/// 资源不存在
pub(crate) fn not_found(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(code, message))
}
