//! 选课存储操作

use super::{SeaOrmStorage, page_index};
use crate::entity::classes::{Column as ClassColumn, Entity as Classes};
use crate::entity::enrollments::{ActiveModel, Column, Entity as Enrollments};
use crate::errors::{CampusError, Result};
use crate::models::{
    PaginationInfo, PaginationQuery,
    enrollments::{
        entities::{Enrollment, EnrollmentInsert},
        requests::EnrollmentListQuery,
        responses::EnrollmentListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbBackend, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, SqlErr, TransactionTrait,
};

impl SeaOrmStorage {
    /// 统计班级当前选课人数
    pub async fn count_enrollments_impl(&self, class_id: i64) -> Result<i64> {
        let count = Enrollments::find()
            .filter(Column::ClassId.eq(class_id))
            .count(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("查询选课人数失败: {e}")))?;

        Ok(count as i64)
    }

    /// 查询学生在班级中的选课记录
    pub async fn find_enrollment_impl(
        &self,
        student_id: &str,
        class_id: i64,
    ) -> Result<Option<Enrollment>> {
        let result = Enrollments::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::ClassId.eq(class_id))
            .one(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("查询选课记录失败: {e}")))?;

        Ok(result.map(|m| m.into_enrollment()))
    }

    /// 条件插入选课记录
    ///
    /// 在同一事务内重新读取班级并统计人数，仅在未满时写入。
    /// 非 SQLite 后端对班级行加排他锁；SQLite 先做一次空更新拿到写锁，
    /// 两者都使同一班级的并发选课串行化。重复选课由唯一索引兜底。
    pub async fn insert_enrollment_impl(
        &self,
        student_id: &str,
        class_id: i64,
    ) -> Result<EnrollmentInsert> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CampusError::database_operation(format!("开启选课事务失败: {e}")))?;

        let mut class_query = Classes::find_by_id(class_id);
        if self.db.get_database_backend() == DbBackend::Sqlite {
            // WAL 下读事务无法升级为写事务，需在读取前占用写锁
            Classes::update_many()
                .col_expr(
                    ClassColumn::UpdatedAt,
                    sea_orm::sea_query::Expr::col(ClassColumn::UpdatedAt),
                )
                .filter(ClassColumn::Id.eq(class_id))
                .exec(&txn)
                .await
                .map_err(|e| CampusError::database_operation(format!("锁定班级失败: {e}")))?;
        } else {
            class_query = class_query.lock_exclusive();
        }

        // 未提交的事务在 drop 时回滚
        let Some(class) = class_query
            .one(&txn)
            .await
            .map_err(|e| CampusError::database_operation(format!("查询班级失败: {e}")))?
        else {
            return Ok(EnrollmentInsert::ClassMissing);
        };

        let enrolled = Enrollments::find()
            .filter(Column::ClassId.eq(class_id))
            .count(&txn)
            .await
            .map_err(|e| CampusError::database_operation(format!("查询选课人数失败: {e}")))?;

        if enrolled as i64 >= i64::from(class.capacity) {
            return Ok(EnrollmentInsert::ClassFull);
        }

        let model = ActiveModel {
            student_id: Set(student_id.to_string()),
            class_id: Set(class_id),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let inserted = match model.insert(&txn).await {
            Ok(inserted) => inserted,
            Err(e) => {
                if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                    return Ok(EnrollmentInsert::AlreadyEnrolled);
                }
                return Err(CampusError::from_db_err("创建选课记录失败", e));
            }
        };

        txn.commit()
            .await
            .map_err(|e| CampusError::database_operation(format!("提交选课事务失败: {e}")))?;

        Ok(EnrollmentInsert::Created(inserted.id))
    }

    /// 通过 ID 获取选课记录
    pub async fn get_enrollment_by_id_impl(&self, enrollment_id: i64) -> Result<Option<Enrollment>> {
        let result = Enrollments::find_by_id(enrollment_id)
            .one(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("查询选课记录失败: {e}")))?;

        Ok(result.map(|m| m.into_enrollment()))
    }

    /// 分页列出选课记录
    pub async fn list_enrollments_with_pagination_impl(
        &self,
        query: EnrollmentListQuery,
    ) -> Result<EnrollmentListResponse> {
        let (page, size) = PaginationQuery::normalized(query.page, query.size);

        let mut select = Enrollments::find();

        if let Some(class_id) = query.class_id {
            select = select.filter(Column::ClassId.eq(class_id));
        }

        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }

        select = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| CampusError::database_operation(format!("查询选课总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| CampusError::database_operation(format!("查询选课页数失败: {e}")))?;

        let enrollments = paginator
            .fetch_page(page_index(page))
            .await
            .map_err(|e| CampusError::database_operation(format!("查询选课列表失败: {e}")))?;

        Ok(EnrollmentListResponse {
            items: enrollments
                .into_iter()
                .map(|m| m.into_enrollment())
                .collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 删除选课记录
    pub async fn delete_enrollment_impl(&self, enrollment_id: i64) -> Result<bool> {
        let result = Enrollments::delete_by_id(enrollment_id)
            .exec(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("删除选课记录失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
