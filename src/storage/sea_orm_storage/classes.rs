//! 班级存储操作

use super::{SeaOrmStorage, page_index};
use crate::entity::classes::{ActiveModel, Column, Entity as Classes};
use crate::errors::{CampusError, Result};
use crate::models::{
    PaginationInfo, PaginationQuery,
    classes::{
        entities::{Class, ClassStatus},
        requests::{ClassListQuery, CreateClassRequest, UpdateClassRequest},
        responses::ClassListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    /// 创建班级
    ///
    /// 邀请码由调用方分配；唯一索引冲突会以 `Conflict` 返回。
    pub async fn create_class_impl(
        &self,
        req: CreateClassRequest,
        invite_code: String,
    ) -> Result<Class> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            subject_id: Set(req.subject_id),
            teacher_id: Set(req.teacher_id),
            name: Set(req.name),
            description: Set(req.description),
            capacity: Set(req.capacity),
            status: Set(req.status.unwrap_or(ClassStatus::Active).to_string()),
            invite_code: Set(invite_code),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CampusError::from_db_err("创建班级失败", e))?;

        Ok(result.into_class())
    }

    /// 通过 ID 获取班级
    pub async fn get_class_by_id_impl(&self, class_id: i64) -> Result<Option<Class>> {
        let result = Classes::find_by_id(class_id)
            .one(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("查询班级失败: {e}")))?;

        Ok(result.map(|m| m.into_class()))
    }

    /// 通过邀请码获取班级
    pub async fn get_class_by_code_impl(&self, invite_code: &str) -> Result<Option<Class>> {
        let result = Classes::find()
            .filter(Column::InviteCode.eq(invite_code))
            .one(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("查询班级失败: {e}")))?;

        Ok(result.map(|m| m.into_class()))
    }

    /// 邀请码是否已被任一班级占用
    pub async fn class_with_invite_code_exists_impl(&self, invite_code: &str) -> Result<bool> {
        let count = Classes::find()
            .filter(Column::InviteCode.eq(invite_code))
            .count(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("查询邀请码失败: {e}")))?;

        Ok(count > 0)
    }

    /// 分页列出班级
    pub async fn list_classes_with_pagination_impl(
        &self,
        query: ClassListQuery,
    ) -> Result<ClassListResponse> {
        let (page, size) = PaginationQuery::normalized(query.page, query.size);

        let mut select = Classes::find();

        if let Some(subject_id) = query.subject_id {
            select = select.filter(Column::SubjectId.eq(subject_id));
        }

        // 教师筛选
        if let Some(teacher_id) = query.teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }

        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        // 搜索条件：班级名称或邀请码
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Name.contains(&escaped))
                    .add(Column::InviteCode.contains(&escaped)),
            );
        }

        // 排序
        select = select.order_by_desc(Column::CreatedAt);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| CampusError::database_operation(format!("查询班级总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| CampusError::database_operation(format!("查询班级页数失败: {e}")))?;

        let classes = paginator
            .fetch_page(page_index(page))
            .await
            .map_err(|e| CampusError::database_operation(format!("查询班级列表失败: {e}")))?;

        Ok(ClassListResponse {
            items: classes.into_iter().map(|m| m.into_class()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 更新班级信息
    pub async fn update_class_impl(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>> {
        // 先检查班级是否存在
        if self.get_class_by_id_impl(class_id).await?.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(class_id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(subject_id) = update.subject_id {
            model.subject_id = Set(subject_id);
        }

        if let Some(teacher_id) = update.teacher_id {
            model.teacher_id = Set(teacher_id);
        }

        if let Some(name) = update.name {
            model.name = Set(name);
        }

        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }

        if let Some(capacity) = update.capacity {
            model.capacity = Set(capacity);
        }

        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| CampusError::from_db_err("更新班级失败", e))?;

        Ok(Some(result.into_class()))
    }

    /// 更换班级邀请码
    pub async fn set_class_invite_code_impl(
        &self,
        class_id: i64,
        invite_code: String,
    ) -> Result<Option<Class>> {
        if self.get_class_by_id_impl(class_id).await?.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(class_id),
            invite_code: Set(invite_code),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| CampusError::from_db_err("更新邀请码失败", e))?;

        Ok(Some(result.into_class()))
    }

    /// 删除班级
    pub async fn delete_class_impl(&self, class_id: i64) -> Result<bool> {
        let result = Classes::delete_by_id(class_id)
            .exec(&self.db)
            .await
            .map_err(|e| CampusError::from_db_err("删除班级失败", e))?;

        Ok(result.rows_affected > 0)
    }
}
