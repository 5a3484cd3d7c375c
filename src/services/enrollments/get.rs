use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EnrollmentService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{not_found, storage_error_response};

pub async fn get_enrollment(
    service: &EnrollmentService,
    request: &HttpRequest,
    enrollment_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_enrollment_by_id(enrollment_id).await {
        Ok(Some(enrollment)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            enrollment,
            "Enrollment retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::EnrollmentNotFound, "Enrollment not found")),
        Err(e) => Ok(storage_error_response("Failed to retrieve enrollment", &e)),
    }
}
