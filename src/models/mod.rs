//! 数据模型定义
//!
//! `entities` 为业务实体，`requests` 为请求参数，`responses` 为响应结构。

pub mod classes;
pub mod common;
pub mod departments;
pub mod enrollments;
pub mod stats;
pub mod subjects;
pub mod system;
pub mod users;

pub use common::{ApiResponse, PaginatedResponse, PaginationInfo, PaginationQuery};

use serde::Serialize;

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 业务错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    ValidationFailed = 1001,
    NotFound = 1004,
    Conflict = 1009,
    InternalServerError = 1500,
    ServiceUnavailable = 1503,

    // 用户
    UserNotFound = 2000,
    UserAlreadyExists = 2001,
    UserEmailInvalid = 2002,
    UserNameInvalid = 2003,
    UserInUse = 2004,

    // 院系
    DepartmentNotFound = 3000,
    DepartmentAlreadyExists = 3001,
    DepartmentCodeInvalid = 3002,
    DepartmentHasSubjects = 3003,

    // 科目
    SubjectNotFound = 4000,
    SubjectAlreadyExists = 4001,
    SubjectCodeInvalid = 4002,
    SubjectHasClasses = 4003,

    // 班级
    ClassNotFound = 5000,
    ClassCreationFailed = 5001,
    ClassCapacityInvalid = 5002,
    ClassHasEnrollments = 5003,
    ClassInviteCodeInvalid = 5004,
    ClassTeacherInvalid = 5005,
    InviteCodeExhausted = 5006,

    // 选课
    EnrollmentNotFound = 6000,
    EnrollmentClassInvalid = 6001,
    EnrollmentClassNotOpen = 6002,
    EnrollmentCapacityExceeded = 6003,
    EnrollmentStudentInvalid = 6004,
    EnrollmentDuplicate = 6005,
}
