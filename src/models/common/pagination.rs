use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 单页最大条数
pub const MAX_PAGE_SIZE: i64 = 100;

// 分页查询参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "pagination.ts")]
pub struct PaginationQuery {
    #[serde(
        default = "default_page",
        deserialize_with = "deserialize_string_to_i64"
    )]
    pub page: i64,
    #[serde(
        default = "default_size",
        deserialize_with = "deserialize_string_to_i64"
    )]
    pub size: i64,
}

impl PaginationQuery {
    /// 规范化页码与每页条数，返回 (page, size)
    pub fn normalized(page: Option<i64>, size: Option<i64>) -> (u64, u64) {
        let page = page.unwrap_or(1).max(1) as u64;
        let size = size.unwrap_or(10).clamp(1, MAX_PAGE_SIZE) as u64;
        (page, size)
    }
}

// 分页响应信息
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "pagination.ts")]
pub struct PaginationInfo {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl PaginationInfo {
    pub fn new(page: u64, page_size: u64, total: u64, total_pages: u64) -> Self {
        Self {
            page: page as i64,
            page_size: page_size as i64,
            total: total as i64,
            total_pages: total_pages as i64,
        }
    }
}

// 分页列表响应
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "pagination.ts")]
pub struct PaginatedResponse<T: TS> {
    pub items: Vec<T>,
    pub pagination: PaginationInfo,
}

// 自定义反序列化函数，支持字符串到i64的转换
fn deserialize_string_to_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{Error, Unexpected, Visitor};
    use std::fmt;

    struct I64Visitor;

    impl<'de> Visitor<'de> for I64Visitor {
        type Value = i64;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an integer or a string containing an integer")
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(value)
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            if value <= i64::MAX as u64 {
                Ok(value as i64)
            } else {
                Err(Error::invalid_value(Unexpected::Unsigned(value), &self))
            }
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: Error,
        {
            value
                .parse()
                .map_err(|_| Error::invalid_value(Unexpected::Str(value), &self))
        }
    }

    deserializer.deserialize_any(I64Visitor)
}

/// 查询字符串中的可选整数过滤条件（`flatten` 时值均以字符串形式传入）
pub(crate) fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Str(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Int(value)) => Ok(Some(value)),
        Some(Raw::Str(value)) if value.trim().is_empty() => Ok(None),
        Some(Raw::Str(value)) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| Error::custom(format!("invalid integer: '{value}'"))),
    }
}

fn default_page() -> i64 {
    1
}

fn default_size() -> i64 {
    10
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self { page: 1, size: 10 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_clamps_page_and_size() {
        assert_eq!(PaginationQuery::normalized(None, None), (1, 10));
        assert_eq!(PaginationQuery::normalized(Some(0), Some(0)), (1, 1));
        assert_eq!(PaginationQuery::normalized(Some(-3), Some(500)), (1, 100));
        assert_eq!(PaginationQuery::normalized(Some(4), Some(25)), (4, 25));
    }

    #[test]
    fn test_pagination_query_accepts_strings() {
        let query: PaginationQuery =
            serde_json::from_str(r#"{"page": "3", "size": 20}"#).unwrap();
        assert_eq!(query.page, 3);
        assert_eq!(query.size, 20);

        let query: PaginationQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.page, 1);
        assert_eq!(query.size, 10);
    }

    #[derive(Debug, Deserialize)]
    struct Filter {
        #[serde(default, deserialize_with = "deserialize_optional_i64")]
        class_id: Option<i64>,
    }

    #[test]
    fn test_optional_i64_filter() {
        let f: Filter = serde_json::from_str(r#"{"class_id": "7"}"#).unwrap();
        assert_eq!(f.class_id, Some(7));
        let f: Filter = serde_json::from_str(r#"{"class_id": 9}"#).unwrap();
        assert_eq!(f.class_id, Some(9));
        let f: Filter = serde_json::from_str(r#"{"class_id": ""}"#).unwrap();
        assert_eq!(f.class_id, None);
        let f: Filter = serde_json::from_str("{}").unwrap();
        assert_eq!(f.class_id, None);
        assert!(serde_json::from_str::<Filter>(r#"{"class_id": "x"}"#).is_err());
    }
}
