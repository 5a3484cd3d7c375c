//! 科目存储操作

use super::{SeaOrmStorage, page_index};
use crate::entity::classes::{Column as ClassColumn, Entity as Classes};
use crate::entity::subjects::{ActiveModel, Column, Entity as Subjects};
use crate::errors::{CampusError, Result};
use crate::models::{
    PaginationInfo, PaginationQuery,
    subjects::{
        entities::Subject,
        requests::{CreateSubjectRequest, SubjectListQuery, UpdateSubjectRequest},
        responses::SubjectListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    /// 创建科目
    pub async fn create_subject_impl(&self, req: CreateSubjectRequest) -> Result<Subject> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            department_id: Set(req.department_id),
            code: Set(req.code),
            name: Set(req.name),
            description: Set(req.description),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CampusError::from_db_err("创建科目失败", e))?;

        Ok(result.into_subject())
    }

    /// 通过 ID 获取科目
    pub async fn get_subject_by_id_impl(&self, subject_id: i64) -> Result<Option<Subject>> {
        let result = Subjects::find_by_id(subject_id)
            .one(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("查询科目失败: {e}")))?;

        Ok(result.map(|m| m.into_subject()))
    }

    /// 分页列出科目
    pub async fn list_subjects_with_pagination_impl(
        &self,
        query: SubjectListQuery,
    ) -> Result<SubjectListResponse> {
        let (page, size) = PaginationQuery::normalized(query.page, query.size);

        let mut select = Subjects::find();

        // 院系筛选
        if let Some(department_id) = query.department_id {
            select = select.filter(Column::DepartmentId.eq(department_id));
        }

        // 搜索条件：名称或代码
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Name.contains(&escaped))
                    .add(Column::Code.contains(&escaped)),
            );
        }

        select = select.order_by_asc(Column::Code);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| CampusError::database_operation(format!("查询科目总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| CampusError::database_operation(format!("查询科目页数失败: {e}")))?;

        let subjects = paginator
            .fetch_page(page_index(page))
            .await
            .map_err(|e| CampusError::database_operation(format!("查询科目列表失败: {e}")))?;

        Ok(SubjectListResponse {
            items: subjects.into_iter().map(|m| m.into_subject()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 更新科目
    pub async fn update_subject_impl(
        &self,
        subject_id: i64,
        update: UpdateSubjectRequest,
    ) -> Result<Option<Subject>> {
        if self.get_subject_by_id_impl(subject_id).await?.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(subject_id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(department_id) = update.department_id {
            model.department_id = Set(department_id);
        }

        if let Some(code) = update.code {
            model.code = Set(code);
        }

        if let Some(name) = update.name {
            model.name = Set(name);
        }

        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| CampusError::from_db_err("更新科目失败", e))?;

        Ok(Some(result.into_subject()))
    }

    /// 删除科目
    pub async fn delete_subject_impl(&self, subject_id: i64) -> Result<bool> {
        let result = Subjects::delete_by_id(subject_id)
            .exec(&self.db)
            .await
            .map_err(|e| CampusError::from_db_err("删除科目失败", e))?;

        Ok(result.rows_affected > 0)
    }

    /// 统计科目下的班级数
    pub async fn count_classes_for_subject_impl(&self, subject_id: i64) -> Result<i64> {
        let count = Classes::find()
            .filter(ClassColumn::SubjectId.eq(subject_id))
            .count(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("查询科目班级数失败: {e}")))?;

        Ok(count as i64)
    }
}
