use super::entities::ClassStatus;
use crate::models::common::{PaginationQuery, pagination::deserialize_optional_i64};
use serde::Deserialize;
use ts_rs::TS;

// 班级查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "class.ts")]
pub struct ClassQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub subject_id: Option<i64>,
    pub teacher_id: Option<String>,
    pub status: Option<ClassStatus>,
    pub search: Option<String>,
}

// 创建班级请求，邀请码由服务端分配
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "class.ts")]
pub struct CreateClassRequest {
    pub subject_id: i64,
    pub teacher_id: String,
    pub name: String,
    pub description: Option<String>,
    pub capacity: i32,
    pub status: Option<ClassStatus>,
}

// 更新班级请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "class.ts")]
pub struct UpdateClassRequest {
    pub subject_id: Option<i64>,
    pub teacher_id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub capacity: Option<i32>,
    pub status: Option<ClassStatus>,
}

// 班级列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct ClassListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub subject_id: Option<i64>,
    pub teacher_id: Option<String>,
    pub status: Option<ClassStatus>,
    pub search: Option<String>,
}
