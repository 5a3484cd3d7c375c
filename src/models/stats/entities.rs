use serde::Serialize;
use ts_rs::TS;

use crate::models::classes::entities::ClassStatus;

// 班级占用情况（存储层原始数据）
#[derive(Debug, Clone)]
pub struct ClassOccupancyRow {
    pub class_id: i64,
    pub name: String,
    pub capacity: i32,
    pub status: ClassStatus,
    pub enrolled: i64,
}

/// 班级占用等级
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "stats.ts")]
pub enum OccupancyLevel {
    Empty,
    Open,
    NearlyFull,
    Full,
}

impl OccupancyLevel {
    /// 占用率达到该比例（百分比）即视为将满
    pub const NEARLY_FULL_PERCENT: i64 = 80;

    pub fn classify(enrolled: i64, capacity: i32) -> Self {
        let capacity = i64::from(capacity);
        if enrolled >= capacity {
            OccupancyLevel::Full
        } else if enrolled == 0 {
            OccupancyLevel::Empty
        } else if enrolled * 100 >= capacity * Self::NEARLY_FULL_PERCENT {
            OccupancyLevel::NearlyFull
        } else {
            OccupancyLevel::Open
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(OccupancyLevel::classify(0, 10), OccupancyLevel::Empty);
        assert_eq!(OccupancyLevel::classify(7, 10), OccupancyLevel::Open);
        assert_eq!(OccupancyLevel::classify(8, 10), OccupancyLevel::NearlyFull);
        assert_eq!(OccupancyLevel::classify(10, 10), OccupancyLevel::Full);
        // 超额（历史数据或容量被调小）仍视为已满
        assert_eq!(OccupancyLevel::classify(12, 10), OccupancyLevel::Full);
    }

    #[test]
    fn test_single_seat_class() {
        assert_eq!(OccupancyLevel::classify(0, 1), OccupancyLevel::Empty);
        assert_eq!(OccupancyLevel::classify(1, 1), OccupancyLevel::Full);
    }
}
