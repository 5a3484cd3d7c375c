use actix_web::{
    HttpRequest, HttpResponse,
    error::{InternalError, JsonPayloadError, QueryPayloadError},
};

use crate::models::{ApiResponse, ErrorCode};

/// JSON 请求体解析失败时返回统一格式的 400 响应
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = match &err {
        JsonPayloadError::ContentType => "Content type must be application/json".to_string(),
        JsonPayloadError::Deserialize(e) => format!("Invalid request body: {e}"),
        JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
            "Request body is too large".to_string()
        }
        _ => format!("Invalid JSON payload: {err}"),
    };

    tracing::debug!("JSON 解析失败: {}", message);

    let response = HttpResponse::BadRequest()
        .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, &message));
    InternalError::from_response(err, response).into()
}

/// 查询参数解析失败时返回统一格式的 400 响应
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = format!("Invalid query parameters: {err}");

    tracing::debug!("查询参数解析失败: {}", message);

    let response = HttpResponse::BadRequest()
        .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, &message));
    InternalError::from_response(err, response).into()
}
