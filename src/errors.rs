//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

use sea_orm::{DbErr, SqlErr};

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_campus_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum CampusError {
            $($variant(String),)*
        }

        impl CampusError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(CampusError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(CampusError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(CampusError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl CampusError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        CampusError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_campus_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    Validation("E004", "Validation Error"),
    NotFound("E005", "Resource Not Found"),
    Conflict("E006", "Resource Conflict"),
    Serialization("E007", "Serialization Error"),
    DateParse("E008", "Date Parse Error"),
}

impl CampusError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 按数据库约束类型归类 `DbErr`
    ///
    /// 唯一约束冲突 -> `Conflict`，外键约束冲突 -> `Validation`，
    /// 其余统一视为 `DatabaseOperation`。
    pub fn from_db_err(context: &str, err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                CampusError::conflict(format!("{context}: {detail}"))
            }
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
                CampusError::validation(format!("{context}: {detail}"))
            }
            _ => CampusError::database_operation(format!("{context}: {err}")),
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, CampusError::Conflict(_))
    }
}

impl fmt::Display for CampusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CampusError {}

// 为常见的错误类型实现 From trait
impl From<DbErr> for CampusError {
    fn from(err: DbErr) -> Self {
        CampusError::DatabaseOperation(err.to_string())
    }
}

impl From<serde_json::Error> for CampusError {
    fn from(err: serde_json::Error) -> Self {
        CampusError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for CampusError {
    fn from(err: chrono::ParseError) -> Self {
        CampusError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CampusError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(CampusError::database_config("test").code(), "E001");
        assert_eq!(CampusError::validation("test").code(), "E004");
        assert_eq!(CampusError::conflict("test").code(), "E006");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            CampusError::not_found("test").error_type(),
            "Resource Not Found"
        );
        assert_eq!(
            CampusError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = CampusError::validation("Invalid input");
        assert_eq!(err.message(), "Invalid input");
    }

    #[test]
    fn test_format_simple() {
        let err = CampusError::conflict("invite code taken");
        let formatted = err.format_simple();
        assert!(formatted.contains("Resource Conflict"));
        assert!(formatted.contains("invite code taken"));
    }

    #[test]
    fn test_generic_db_err_is_operation_error() {
        let err = CampusError::from_db_err("load class", DbErr::Custom("boom".into()));
        assert!(!err.is_conflict());
        assert_eq!(err.code(), "E003");
        assert!(err.message().starts_with("load class"));
    }
}
