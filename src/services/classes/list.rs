use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use crate::models::{
    ApiResponse,
    classes::requests::{ClassListQuery, ClassQueryParams},
};
use crate::services::storage_error_response;

pub async fn list_classes(
    service: &ClassService,
    request: &HttpRequest,
    query: ClassQueryParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let list_query = ClassListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        subject_id: query.subject_id,
        teacher_id: query.teacher_id,
        status: query.status,
        search: query.search,
    };

    match storage.list_classes_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Class list retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response("Failed to retrieve class list", &e)),
    }
}
