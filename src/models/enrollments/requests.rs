use crate::models::common::{PaginationQuery, pagination::deserialize_optional_i64};
use serde::Deserialize;
use ts_rs::TS;

// 通过班级 ID 选课
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "enrollment.ts")]
pub struct CreateEnrollmentRequest {
    pub student_id: String,
    pub class_id: i64,
}

// 通过邀请码加入班级
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "enrollment.ts")]
pub struct JoinClassRequest {
    pub student_id: String,
    pub invite_code: String,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "enrollment.ts")]
pub struct EnrollmentListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub class_id: Option<i64>,
    pub student_id: Option<String>,
}

// 选课列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct EnrollmentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub class_id: Option<i64>,
    pub student_id: Option<String>,
}
