use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::EnrollmentService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{not_found, storage_error_response};

pub async fn delete_enrollment(
    service: &EnrollmentService,
    request: &HttpRequest,
    enrollment_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.delete_enrollment(enrollment_id).await {
        Ok(true) => {
            info!("Enrollment {} deleted", enrollment_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Enrollment deleted successfully",
            )))
        }
        Ok(false) => Ok(not_found(ErrorCode::EnrollmentNotFound, "Enrollment not found")),
        Err(e) => Ok(storage_error_response("Enrollment deletion failed", &e)),
    }
}
