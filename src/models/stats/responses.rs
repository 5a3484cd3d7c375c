use serde::Serialize;
use ts_rs::TS;

use super::entities::{ClassOccupancyRow, OccupancyLevel};
use crate::models::{classes::entities::ClassStatus, users::entities::UserRole};

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "stats.ts")]
pub struct RoleCount {
    pub role: UserRole,
    pub count: i64,
}

// 系统总览
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "stats.ts")]
pub struct OverviewStats {
    pub total_users: i64,
    pub users_by_role: Vec<RoleCount>,
    pub departments: i64,
    pub subjects: i64,
    pub classes: i64,
    pub active_classes: i64,
    pub enrollments: i64,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "stats.ts")]
pub struct ClassOccupancy {
    pub class_id: i64,
    pub name: String,
    pub capacity: i32,
    pub enrolled: i64,
    pub status: ClassStatus,
    pub level: OccupancyLevel,
}

#[derive(Debug, Clone, Default, Serialize, TS)]
#[ts(export, export_to = "stats.ts")]
pub struct OccupancySummary {
    pub empty: i64,
    pub open: i64,
    pub nearly_full: i64,
    pub full: i64,
}

// 班级占用报告
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "stats.ts")]
pub struct OccupancyReport {
    pub items: Vec<ClassOccupancy>,
    pub summary: OccupancySummary,
}

impl OccupancyReport {
    pub fn from_rows(rows: Vec<ClassOccupancyRow>) -> Self {
        let mut summary = OccupancySummary::default();
        let items = rows
            .into_iter()
            .map(|row| {
                let level = OccupancyLevel::classify(row.enrolled, row.capacity);
                match level {
                    OccupancyLevel::Empty => summary.empty += 1,
                    OccupancyLevel::Open => summary.open += 1,
                    OccupancyLevel::NearlyFull => summary.nearly_full += 1,
                    OccupancyLevel::Full => summary.full += 1,
                }
                ClassOccupancy {
                    class_id: row.class_id,
                    name: row.name,
                    capacity: row.capacity,
                    enrolled: row.enrolled,
                    status: row.status,
                    level,
                }
            })
            .collect();

        Self { items, summary }
    }
}

// 院系统计
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "stats.ts")]
pub struct DepartmentStats {
    pub department_id: i64,
    pub code: String,
    pub name: String,
    pub subject_count: i64,
    pub class_count: i64,
    pub enrollment_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(class_id: i64, capacity: i32, enrolled: i64) -> ClassOccupancyRow {
        ClassOccupancyRow {
            class_id,
            name: format!("class-{class_id}"),
            capacity,
            status: ClassStatus::Active,
            enrolled,
        }
    }

    #[test]
    fn test_report_counts_each_level() {
        let report = OccupancyReport::from_rows(vec![
            row(1, 30, 0),
            row(2, 30, 10),
            row(3, 30, 25),
            row(4, 30, 30),
            row(5, 2, 2),
        ]);

        assert_eq!(report.items.len(), 5);
        assert_eq!(report.summary.empty, 1);
        assert_eq!(report.summary.open, 1);
        assert_eq!(report.summary.nearly_full, 1);
        assert_eq!(report.summary.full, 2);
        assert_eq!(report.items[2].level, OccupancyLevel::NearlyFull);
    }
}
