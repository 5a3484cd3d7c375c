//! 统计查询

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::{classes, departments, enrollments, subjects, users};
use crate::errors::{CampusError, Result};
use crate::models::{
    classes::entities::ClassStatus,
    stats::{
        entities::ClassOccupancyRow,
        responses::{DepartmentStats, OverviewStats, RoleCount},
    },
    users::entities::UserRole,
};
use sea_orm::{
    ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

impl SeaOrmStorage {
    /// 系统总览
    pub async fn stats_overview_impl(&self) -> Result<OverviewStats> {
        let map_err = |e: sea_orm::DbErr| CampusError::database_operation(format!("统计查询失败: {e}"));

        let total_users = users::Entity::find().count(&self.db).await.map_err(map_err)?;

        let mut users_by_role = Vec::with_capacity(UserRole::all_roles().len());
        for role in UserRole::all_roles() {
            let count = users::Entity::find()
                .filter(users::Column::Role.eq(role.to_string()))
                .count(&self.db)
                .await
                .map_err(map_err)?;
            users_by_role.push(RoleCount {
                role: *role,
                count: count as i64,
            });
        }

        let departments = departments::Entity::find()
            .count(&self.db)
            .await
            .map_err(map_err)?;
        let subjects = subjects::Entity::find()
            .count(&self.db)
            .await
            .map_err(map_err)?;
        let classes = classes::Entity::find()
            .count(&self.db)
            .await
            .map_err(map_err)?;
        let active_classes = classes::Entity::find()
            .filter(classes::Column::Status.eq(ClassStatus::ACTIVE))
            .count(&self.db)
            .await
            .map_err(map_err)?;
        let enrollments = enrollments::Entity::find()
            .count(&self.db)
            .await
            .map_err(map_err)?;

        Ok(OverviewStats {
            total_users: total_users as i64,
            users_by_role,
            departments: departments as i64,
            subjects: subjects as i64,
            classes: classes as i64,
            active_classes: active_classes as i64,
            enrollments: enrollments as i64,
        })
    }

    /// 各班级选课人数，按班级 ID 分组
    async fn enrollment_counts_by_class(&self) -> Result<HashMap<i64, i64>> {
        let rows = enrollments::Entity::find()
            .select_only()
            .column(enrollments::Column::ClassId)
            .column_as(enrollments::Column::Id.count(), "enrolled")
            .group_by(enrollments::Column::ClassId)
            .into_tuple::<(i64, i64)>()
            .all(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("统计选课人数失败: {e}")))?;

        Ok(rows.into_iter().collect())
    }

    /// 所有班级的占用情况
    pub async fn list_class_occupancy_impl(&self) -> Result<Vec<ClassOccupancyRow>> {
        let counts = self.enrollment_counts_by_class().await?;

        let classes = classes::Entity::find()
            .order_by_asc(classes::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("查询班级列表失败: {e}")))?;

        Ok(classes
            .into_iter()
            .map(|m| {
                let class = m.into_class();
                ClassOccupancyRow {
                    enrolled: counts.get(&class.id).copied().unwrap_or(0),
                    class_id: class.id,
                    name: class.name,
                    capacity: class.capacity,
                    status: class.status,
                }
            })
            .collect())
    }

    /// 按院系汇总科目、班级、选课数量
    pub async fn list_department_stats_impl(&self) -> Result<Vec<DepartmentStats>> {
        let map_err = |e: sea_orm::DbErr| CampusError::database_operation(format!("统计院系失败: {e}"));

        let enrollment_counts = self.enrollment_counts_by_class().await?;

        let departments = departments::Entity::find()
            .order_by_asc(departments::Column::Code)
            .all(&self.db)
            .await
            .map_err(map_err)?;

        // subject_id -> department_id
        let subject_departments: HashMap<i64, i64> = subjects::Entity::find()
            .select_only()
            .column(subjects::Column::Id)
            .column(subjects::Column::DepartmentId)
            .into_tuple::<(i64, i64)>()
            .all(&self.db)
            .await
            .map_err(map_err)?
            .into_iter()
            .collect();

        let class_subjects = classes::Entity::find()
            .select_only()
            .column(classes::Column::Id)
            .column(classes::Column::SubjectId)
            .into_tuple::<(i64, i64)>()
            .all(&self.db)
            .await
            .map_err(map_err)?;

        let mut subject_count: HashMap<i64, i64> = HashMap::new();
        for department_id in subject_departments.values() {
            *subject_count.entry(*department_id).or_default() += 1;
        }

        let mut class_count: HashMap<i64, i64> = HashMap::new();
        let mut enrollment_count: HashMap<i64, i64> = HashMap::new();
        for (class_id, subject_id) in class_subjects {
            let Some(department_id) = subject_departments.get(&subject_id) else {
                continue;
            };
            *class_count.entry(*department_id).or_default() += 1;
            *enrollment_count.entry(*department_id).or_default() +=
                enrollment_counts.get(&class_id).copied().unwrap_or(0);
        }

        Ok(departments
            .into_iter()
            .map(|d| DepartmentStats {
                department_id: d.id,
                subject_count: subject_count.get(&d.id).copied().unwrap_or(0),
                class_count: class_count.get(&d.id).copied().unwrap_or(0),
                enrollment_count: enrollment_count.get(&d.id).copied().unwrap_or(0),
                code: d.code,
                name: d.name,
            })
            .collect())
    }
}
