use super::entities::UserRole;
use crate::models::common::PaginationQuery;
use serde::Deserialize;
use ts_rs::TS;

// 用户查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "user.ts")]
pub struct UserListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub role: Option<UserRole>,
    pub search: Option<String>,
}

// 用户创建请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "user.ts")]
pub struct CreateUserRequest {
    // 外部身份 ID，不填写则自动生成
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub image: Option<String>,
}

// 用户更新请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "user.ts")]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<UserRole>,
    pub image: Option<String>,
}

// 用户列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct UserListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub role: Option<UserRole>,
    pub search: Option<String>,
}
