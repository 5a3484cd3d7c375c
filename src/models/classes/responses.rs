use super::entities::Class;
use crate::models::common::PaginatedResponse;
use serde::Serialize;
use ts_rs::TS;

// 班级列表响应
pub type ClassListResponse = PaginatedResponse<Class>;

// 邀请码分配结果
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "class.ts")]
pub struct InviteCodeResponse {
    pub code: String,
}
