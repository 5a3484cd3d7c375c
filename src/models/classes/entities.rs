use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 班级状态，只有 active 状态的班级允许选课
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "class.ts")]
pub enum ClassStatus {
    Active,   // 开放
    Inactive, // 暂停
    Archived, // 归档
}

impl ClassStatus {
    pub const ACTIVE: &'static str = "active";
    pub const INACTIVE: &'static str = "inactive";
    pub const ARCHIVED: &'static str = "archived";

    pub fn is_open(&self) -> bool {
        *self == ClassStatus::Active
    }
}

impl<'de> Deserialize<'de> for ClassStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的班级状态: '{s}'. 支持的状态: active, inactive, archived"
            ))
        })
    }
}

impl std::fmt::Display for ClassStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClassStatus::Active => write!(f, "{}", ClassStatus::ACTIVE),
            ClassStatus::Inactive => write!(f, "{}", ClassStatus::INACTIVE),
            ClassStatus::Archived => write!(f, "{}", ClassStatus::ARCHIVED),
        }
    }
}

impl std::str::FromStr for ClassStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ClassStatus::ACTIVE => Ok(ClassStatus::Active),
            ClassStatus::INACTIVE => Ok(ClassStatus::Inactive),
            ClassStatus::ARCHIVED => Ok(ClassStatus::Archived),
            _ => Err(format!("Invalid class status: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "class.ts")]
pub struct Class {
    // 班级ID
    pub id: i64,
    // 所属科目
    pub subject_id: i64,
    // 任课教师ID
    pub teacher_id: String,
    // 班级名称
    pub name: String,
    // 班级描述
    pub description: Option<String>,
    // 容量
    pub capacity: i32,
    // 状态
    pub status: ClassStatus,
    // 邀请码
    pub invite_code: String,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
    // 更新时间
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_active_is_open() {
        assert!(ClassStatus::Active.is_open());
        assert!(!ClassStatus::Inactive.is_open());
        assert!(!ClassStatus::Archived.is_open());
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("archived".parse::<ClassStatus>(), Ok(ClassStatus::Archived));
        assert!("closed".parse::<ClassStatus>().is_err());
        assert!(serde_json::from_str::<ClassStatus>(r#""closed""#).is_err());
    }
}
