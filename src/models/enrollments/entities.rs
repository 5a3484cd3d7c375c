use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 选课记录，(student_id, class_id) 唯一
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "enrollment.ts")]
pub struct Enrollment {
    pub id: i64,
    pub class_id: i64,
    pub student_id: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// 存储层条件插入的结果
///
/// 插入在同一事务内重新核对班级存在性与容量，
/// 并以 (student_id, class_id) 唯一索引作为重复选课的最终保障。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrollmentInsert {
    Created(i64),
    ClassMissing,
    ClassFull,
    AlreadyEnrolled,
}
