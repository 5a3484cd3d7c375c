use crate::models::common::PaginationQuery;
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "department.ts")]
pub struct DepartmentListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "department.ts")]
pub struct CreateDepartmentRequest {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "department.ts")]
pub struct UpdateDepartmentRequest {
    pub code: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
}

// 院系列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct DepartmentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub search: Option<String>,
}
