use std::sync::Arc;

use crate::models::{
    classes::{
        entities::Class,
        requests::{ClassListQuery, CreateClassRequest, UpdateClassRequest},
        responses::ClassListResponse,
    },
    departments::{
        entities::Department,
        requests::{CreateDepartmentRequest, DepartmentListQuery, UpdateDepartmentRequest},
        responses::DepartmentListResponse,
    },
    enrollments::{
        entities::{Enrollment, EnrollmentInsert},
        requests::EnrollmentListQuery,
        responses::EnrollmentListResponse,
    },
    stats::{
        entities::ClassOccupancyRow,
        responses::{DepartmentStats, OverviewStats},
    },
    subjects::{
        entities::Subject,
        requests::{CreateSubjectRequest, SubjectListQuery, UpdateSubjectRequest},
        responses::SubjectListResponse,
    },
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};

use crate::errors::Result;

#[cfg(test)]
pub(crate) mod memory;
pub mod sea_orm_storage;

/// 选课与邀请码所需的最小存储能力
///
/// 领域服务（邀请码分配、选课准入）只依赖此 trait，
/// 测试中可以用内存实现替换。
#[async_trait::async_trait]
pub trait RosterStore: Send + Sync {
    // 通过ID获取班级信息
    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>>;
    // 统计班级当前选课人数
    async fn count_enrollments(&self, class_id: i64) -> Result<i64>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, user_id: &str) -> Result<Option<User>>;
    // 查询学生在班级中的选课记录
    async fn find_enrollment(&self, student_id: &str, class_id: i64)
    -> Result<Option<Enrollment>>;
    // 条件插入选课记录：班级不存在、已满或重复时不写入
    async fn insert_enrollment(&self, student_id: &str, class_id: i64)
    -> Result<EnrollmentInsert>;
    // 邀请码是否已被占用
    async fn class_with_invite_code_exists(&self, invite_code: &str) -> Result<bool>;
}

#[async_trait::async_trait]
pub trait Storage: RosterStore {
    /// 用户管理方法
    // 创建用户
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 列出用户
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // 更新用户信息
    async fn update_user(&self, user_id: &str, update: UpdateUserRequest) -> Result<Option<User>>;
    // 删除用户
    async fn delete_user(&self, user_id: &str) -> Result<bool>;
    // 统计教师负责的班级数
    async fn count_classes_taught(&self, teacher_id: &str) -> Result<i64>;

    /// 院系管理方法
    async fn create_department(&self, department: CreateDepartmentRequest) -> Result<Department>;
    async fn get_department_by_id(&self, department_id: i64) -> Result<Option<Department>>;
    async fn list_departments_with_pagination(
        &self,
        query: DepartmentListQuery,
    ) -> Result<DepartmentListResponse>;
    async fn update_department(
        &self,
        department_id: i64,
        update: UpdateDepartmentRequest,
    ) -> Result<Option<Department>>;
    async fn delete_department(&self, department_id: i64) -> Result<bool>;
    // 统计院系下的科目数
    async fn count_subjects_in_department(&self, department_id: i64) -> Result<i64>;

    /// 科目管理方法
    async fn create_subject(&self, subject: CreateSubjectRequest) -> Result<Subject>;
    async fn get_subject_by_id(&self, subject_id: i64) -> Result<Option<Subject>>;
    async fn list_subjects_with_pagination(
        &self,
        query: SubjectListQuery,
    ) -> Result<SubjectListResponse>;
    async fn update_subject(
        &self,
        subject_id: i64,
        update: UpdateSubjectRequest,
    ) -> Result<Option<Subject>>;
    async fn delete_subject(&self, subject_id: i64) -> Result<bool>;
    // 统计科目下的班级数
    async fn count_classes_for_subject(&self, subject_id: i64) -> Result<i64>;

    /// 班级管理方法
    // 创建班级，邀请码由领域层预先分配
    async fn create_class(&self, class: CreateClassRequest, invite_code: String) -> Result<Class>;
    // 通过邀请码获取班级信息
    async fn get_class_by_code(&self, invite_code: &str) -> Result<Option<Class>>;
    // 列出班级
    async fn list_classes_with_pagination(
        &self,
        query: ClassListQuery,
    ) -> Result<ClassListResponse>;
    // 更新班级信息
    async fn update_class(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>>;
    // 更换邀请码
    async fn set_class_invite_code(
        &self,
        class_id: i64,
        invite_code: String,
    ) -> Result<Option<Class>>;
    // 删除班级
    async fn delete_class(&self, class_id: i64) -> Result<bool>;

    /// 选课管理方法
    async fn get_enrollment_by_id(&self, enrollment_id: i64) -> Result<Option<Enrollment>>;
    async fn list_enrollments_with_pagination(
        &self,
        query: EnrollmentListQuery,
    ) -> Result<EnrollmentListResponse>;
    async fn delete_enrollment(&self, enrollment_id: i64) -> Result<bool>;

    /// 统计方法
    async fn stats_overview(&self) -> Result<OverviewStats>;
    async fn list_class_occupancy(&self) -> Result<Vec<ClassOccupancyRow>>;
    async fn list_department_stats(&self) -> Result<Vec<DepartmentStats>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
