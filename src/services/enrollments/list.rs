use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EnrollmentService;
use crate::models::{
    ApiResponse,
    enrollments::requests::{EnrollmentListParams, EnrollmentListQuery},
};
use crate::services::storage_error_response;

pub async fn list_enrollments(
    service: &EnrollmentService,
    request: &HttpRequest,
    query: EnrollmentListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let list_query = EnrollmentListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        class_id: query.class_id,
        student_id: query.student_id,
    };

    match storage.list_enrollments_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Enrollment list retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response("Failed to retrieve enrollment list", &e)),
    }
}
