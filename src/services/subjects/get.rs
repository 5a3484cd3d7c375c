use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubjectService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{not_found, storage_error_response};

pub async fn get_subject(
    service: &SubjectService,
    request: &HttpRequest,
    subject_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_subject_by_id(subject_id).await {
        Ok(Some(subject)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            subject,
            "Subject retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::SubjectNotFound, "Subject not found")),
        Err(e) => Ok(storage_error_response("Failed to retrieve subject", &e)),
    }
}
