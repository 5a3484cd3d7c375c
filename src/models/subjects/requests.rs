use crate::models::common::{PaginationQuery, pagination::deserialize_optional_i64};
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "subject.ts")]
pub struct SubjectListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub department_id: Option<i64>,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "subject.ts")]
pub struct CreateSubjectRequest {
    pub department_id: i64,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "subject.ts")]
pub struct UpdateSubjectRequest {
    pub department_id: Option<i64>,
    pub code: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
}

// 科目列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct SubjectListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub department_id: Option<i64>,
    pub search: Option<String>,
}
