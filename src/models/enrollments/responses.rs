use super::entities::Enrollment;
use crate::models::common::PaginatedResponse;
use serde::Serialize;
use ts_rs::TS;

pub type EnrollmentListResponse = PaginatedResponse<Enrollment>;

// 选课成功
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "enrollment.ts")]
pub struct EnrollmentCreatedResponse {
    pub id: i64,
}

// 班级已满时附带容量，便于前端直接展示
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "enrollment.ts")]
pub struct CapacityExceededDetail {
    pub capacity: i32,
}
