use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DepartmentService;
use crate::models::{
    ApiResponse,
    departments::requests::{DepartmentListParams, DepartmentListQuery},
};
use crate::services::storage_error_response;

pub async fn list_departments(
    service: &DepartmentService,
    request: &HttpRequest,
    query: DepartmentListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let list_query = DepartmentListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        search: query.search,
    };

    match storage.list_departments_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Department list retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response("Failed to retrieve department list", &e)),
    }
}
