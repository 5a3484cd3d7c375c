//! 用户存储操作

use super::{SeaOrmStorage, page_index};
use crate::entity::classes::{Column as ClassColumn, Entity as Classes};
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{CampusError, Result};
use crate::models::{
    PaginationInfo, PaginationQuery,
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    /// 创建用户
    pub async fn create_user_impl(&self, req: CreateUserRequest) -> Result<User> {
        let now = chrono::Utc::now().timestamp();
        let id = req
            .id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        let model = ActiveModel {
            id: Set(id),
            name: Set(req.name),
            email: Set(req.email),
            role: Set(req.role.to_string()),
            image: Set(req.image),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CampusError::from_db_err("创建用户失败", e))?;

        Ok(result.into_user())
    }

    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, user_id: &str) -> Result<Option<User>> {
        let result = Users::find_by_id(user_id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 分页列出用户
    pub async fn list_users_with_pagination_impl(
        &self,
        query: UserListQuery,
    ) -> Result<UserListResponse> {
        let (page, size) = PaginationQuery::normalized(query.page, query.size);

        let mut select = Users::find();

        // 角色筛选
        if let Some(role) = query.role {
            select = select.filter(Column::Role.eq(role.to_string()));
        }

        // 搜索条件：姓名或邮箱
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Name.contains(&escaped))
                    .add(Column::Email.contains(&escaped)),
            );
        }

        select = select.order_by_desc(Column::CreatedAt);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| CampusError::database_operation(format!("查询用户总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| CampusError::database_operation(format!("查询用户页数失败: {e}")))?;

        let users = paginator
            .fetch_page(page_index(page))
            .await
            .map_err(|e| CampusError::database_operation(format!("查询用户列表失败: {e}")))?;

        Ok(UserListResponse {
            items: users.into_iter().map(|m| m.into_user()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 更新用户信息
    pub async fn update_user_impl(
        &self,
        user_id: &str,
        update: UpdateUserRequest,
    ) -> Result<Option<User>> {
        // 先检查用户是否存在
        if self.get_user_by_id_impl(user_id).await?.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(user_id.to_string()),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name);
        }

        if let Some(email) = update.email {
            model.email = Set(email);
        }

        if let Some(role) = update.role {
            model.role = Set(role.to_string());
        }

        if let Some(image) = update.image {
            model.image = Set(Some(image));
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| CampusError::from_db_err("更新用户失败", e))?;

        Ok(Some(result.into_user()))
    }

    /// 删除用户
    pub async fn delete_user_impl(&self, user_id: &str) -> Result<bool> {
        let result = Users::delete_by_id(user_id.to_string())
            .exec(&self.db)
            .await
            .map_err(|e| CampusError::from_db_err("删除用户失败", e))?;

        Ok(result.rows_affected > 0)
    }

    /// 统计教师负责的班级数
    pub async fn count_classes_taught_impl(&self, teacher_id: &str) -> Result<i64> {
        let count = Classes::find()
            .filter(ClassColumn::TeacherId.eq(teacher_id))
            .count(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("查询教师班级数失败: {e}")))?;

        Ok(count as i64)
    }
}
