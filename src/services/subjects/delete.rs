use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SubjectService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{not_found, storage_error_response};

pub async fn delete_subject(
    service: &SubjectService,
    request: &HttpRequest,
    subject_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.count_classes_for_subject(subject_id).await {
        Ok(0) => {}
        Ok(count) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::SubjectHasClasses,
                format!("Subject still has {count} class(es)"),
            )));
        }
        Err(e) => return Ok(storage_error_response("Subject deletion failed", &e)),
    }

    match storage.delete_subject(subject_id).await {
        Ok(true) => {
            info!("Subject {} deleted", subject_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Subject deleted successfully")))
        }
        Ok(false) => Ok(not_found(ErrorCode::SubjectNotFound, "Subject not found")),
        Err(e) => Ok(storage_error_response("Subject deletion failed", &e)),
    }
}
