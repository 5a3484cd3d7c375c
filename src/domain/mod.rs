//! 领域核心
//!
//! 邀请码分配与选课准入。两者只依赖 [`RosterStore`](crate::storage::RosterStore)，
//! 不感知 HTTP 层。

pub mod admission;
pub mod invite_code;

pub use admission::{AdmissionError, EnrollmentAdmission};
pub use invite_code::{AllocationError, CodeGenerator, InviteCodeAllocator, RandomCodeGenerator};
