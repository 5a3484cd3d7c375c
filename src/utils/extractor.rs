//! 路径参数安全提取
//!
//! 非法的路径 ID（非数字、非正数）直接返回统一格式的 400 响应，
//! 不进入业务处理。

use actix_web::{HttpResponse, error::InternalError};

use crate::models::{ApiResponse, ErrorCode};

/// 解析路径中的正整数 ID
pub fn parse_safe_i64(raw: Option<&str>, name: &str) -> Result<i64, String> {
    let raw = raw.ok_or_else(|| format!("Missing path parameter: {name}"))?;
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(format!("Invalid {name}: '{raw}'")),
    }
}

/// 将参数错误转换为 actix 错误
pub fn bad_path_param(message: String) -> actix_web::Error {
    let response =
        HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, &message));
    InternalError::from_response(message, response).into()
}

/// 为指定路径参数名生成 i64 提取器
#[macro_export]
macro_rules! define_safe_i64_extractor {
    ($name:ident, $param:literal) => {
        pub struct $name(pub i64);

        impl actix_web::FromRequest for $name {
            type Error = actix_web::Error;
            type Future = std::future::Ready<Result<Self, Self::Error>>;

            fn from_request(
                req: &actix_web::HttpRequest,
                _payload: &mut actix_web::dev::Payload,
            ) -> Self::Future {
                std::future::ready(
                    $crate::utils::extractor::parse_safe_i64(req.match_info().get($param), $param)
                        .map($name)
                        .map_err($crate::utils::extractor::bad_path_param),
                )
            }
        }
    };
}

define_safe_i64_extractor!(SafeDepartmentIdI64, "department_id");
define_safe_i64_extractor!(SafeSubjectIdI64, "subject_id");
define_safe_i64_extractor!(SafeClassIdI64, "class_id");
define_safe_i64_extractor!(SafeEnrollmentIdI64, "enrollment_id");
