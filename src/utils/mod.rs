pub mod extractor;
pub mod parameter_error_handler;
pub mod random_code;
pub mod sql;
pub mod validate;

pub use extractor::{
    SafeClassIdI64, SafeDepartmentIdI64, SafeEnrollmentIdI64, SafeSubjectIdI64,
};
pub use parameter_error_handler::json_error_handler;
pub use parameter_error_handler::query_error_handler;
pub use sql::escape_like_pattern;
