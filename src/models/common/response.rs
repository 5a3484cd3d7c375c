use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::ErrorCode;

// 统一的API响应结构
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "api.ts")]
pub struct ApiResponse<T: TS> {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl<T: TS> ApiResponse<T> {
    fn build(code: ErrorCode, data: Option<T>, message: impl Into<String>) -> Self {
        Self {
            code: code as i32,
            message: message.into(),
            data,
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self::build(ErrorCode::Success, Some(data), message)
    }

    pub fn error(code: ErrorCode, data: T, message: impl Into<String>) -> Self {
        Self::build(code, Some(data), message)
    }
}

impl ApiResponse<()> {
    pub fn success_empty(message: impl Into<String>) -> Self {
        Self::build(ErrorCode::Success, None, message)
    }

    pub fn error_empty(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::build(code, None, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_empty_omits_data() {
        let resp = ApiResponse::error_empty(ErrorCode::ClassNotFound, "Class not found");
        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(value["code"], ErrorCode::ClassNotFound as i32);
        assert_eq!(value["message"], "Class not found");
        assert!(value.get("data").is_none());
    }

    #[test]
    fn test_success_carries_data() {
        let resp = ApiResponse::success(42_i64, "ok");
        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(value["code"], 0);
        assert_eq!(value["data"], 42);
    }
}
