//! 院系存储操作

use super::{SeaOrmStorage, page_index};
use crate::entity::departments::{ActiveModel, Column, Entity as Departments};
use crate::entity::subjects::{Column as SubjectColumn, Entity as Subjects};
use crate::errors::{CampusError, Result};
use crate::models::{
    PaginationInfo, PaginationQuery,
    departments::{
        entities::Department,
        requests::{CreateDepartmentRequest, DepartmentListQuery, UpdateDepartmentRequest},
        responses::DepartmentListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    /// 创建院系
    pub async fn create_department_impl(&self, req: CreateDepartmentRequest) -> Result<Department> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
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
            .map_err(|e| CampusError::from_db_err("创建院系失败", e))?;

        Ok(result.into_department())
    }

    /// 通过 ID 获取院系
    pub async fn get_department_by_id_impl(&self, department_id: i64) -> Result<Option<Department>> {
        let result = Departments::find_by_id(department_id)
            .one(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("查询院系失败: {e}")))?;

        Ok(result.map(|m| m.into_department()))
    }

    /// 分页列出院系
    pub async fn list_departments_with_pagination_impl(
        &self,
        query: DepartmentListQuery,
    ) -> Result<DepartmentListResponse> {
        let (page, size) = PaginationQuery::normalized(query.page, query.size);

        let mut select = Departments::find();

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
            .map_err(|e| CampusError::database_operation(format!("查询院系总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| CampusError::database_operation(format!("查询院系页数失败: {e}")))?;

        let departments = paginator
            .fetch_page(page_index(page))
            .await
            .map_err(|e| CampusError::database_operation(format!("查询院系列表失败: {e}")))?;

        Ok(DepartmentListResponse {
            items: departments
                .into_iter()
                .map(|m| m.into_department())
                .collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 更新院系
    pub async fn update_department_impl(
        &self,
        department_id: i64,
        update: UpdateDepartmentRequest,
    ) -> Result<Option<Department>> {
        if self.get_department_by_id_impl(department_id).await?.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(department_id),
            updated_at: Set(now),
            ..Default::default()
        };

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
            .map_err(|e| CampusError::from_db_err("更新院系失败", e))?;

        Ok(Some(result.into_department()))
    }

    /// 删除院系
    pub async fn delete_department_impl(&self, department_id: i64) -> Result<bool> {
        let result = Departments::delete_by_id(department_id)
            .exec(&self.db)
            .await
            .map_err(|e| CampusError::from_db_err("删除院系失败", e))?;

        Ok(result.rows_affected > 0)
    }

    /// 统计院系下的科目数
    pub async fn count_subjects_in_department_impl(&self, department_id: i64) -> Result<i64> {
        let count = Subjects::find()
            .filter(SubjectColumn::DepartmentId.eq(department_id))
            .count(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("查询院系科目数失败: {e}")))?;

        Ok(count as i64)
    }
}
