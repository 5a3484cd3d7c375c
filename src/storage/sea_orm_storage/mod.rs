//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod classes;
mod departments;
mod enrollments;
mod stats;
mod subjects;
mod users;

use crate::config::{AppConfig, DatabaseConfig};
use crate::errors::{CampusError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 使用全局配置创建存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        Self::connect(&config.database).await
    }

    /// 按数据库配置建立连接并运行迁移
    pub async fn connect(database: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, database).await?
        } else {
            Self::connect_generic(&db_url, database).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| CampusError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, database: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        // 内存库每个连接都是独立数据库，只能使用单连接且不能回收
        let in_memory = url.contains(":memory:");

        let mut opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| CampusError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        if !in_memory {
            opt = opt
                .journal_mode(SqliteJournalMode::Wal)
                .pragma("wal_autocheckpoint", "1000");
        }

        let mut pool_options = SqlitePoolOptions::new()
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(database.timeout));

        pool_options = if in_memory {
            pool_options
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            pool_options
                .max_connections(database.pool_size)
                .idle_timeout(Duration::from_secs(300))
        };

        let pool = pool_options
            .connect_with(opt)
            .await
            .map_err(|e| CampusError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, database: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(database.timeout))
            .acquire_timeout(Duration::from_secs(database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| CampusError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(CampusError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

/// 分页查询的页码（从 1 开始）转换为 SeaORM 页索引
pub(crate) fn page_index(page: u64) -> u64 {
    page.saturating_sub(1)
}

// Storage trait 实现
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
use crate::storage::{RosterStore, Storage};
use async_trait::async_trait;

#[async_trait]
impl RosterStore for SeaOrmStorage {
    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>> {
        self.get_class_by_id_impl(class_id).await
    }

    async fn count_enrollments(&self, class_id: i64) -> Result<i64> {
        self.count_enrollments_impl(class_id).await
    }

    async fn get_user_by_id(&self, user_id: &str) -> Result<Option<User>> {
        self.get_user_by_id_impl(user_id).await
    }

    async fn find_enrollment(
        &self,
        student_id: &str,
        class_id: i64,
    ) -> Result<Option<Enrollment>> {
        self.find_enrollment_impl(student_id, class_id).await
    }

    async fn insert_enrollment(
        &self,
        student_id: &str,
        class_id: i64,
    ) -> Result<EnrollmentInsert> {
        self.insert_enrollment_impl(student_id, class_id).await
    }

    async fn class_with_invite_code_exists(&self, invite_code: &str) -> Result<bool> {
        self.class_with_invite_code_exists_impl(invite_code).await
    }
}

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn update_user(&self, user_id: &str, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(user_id, update).await
    }

    async fn delete_user(&self, user_id: &str) -> Result<bool> {
        self.delete_user_impl(user_id).await
    }

    async fn count_classes_taught(&self, teacher_id: &str) -> Result<i64> {
        self.count_classes_taught_impl(teacher_id).await
    }

    // 院系模块
    async fn create_department(&self, department: CreateDepartmentRequest) -> Result<Department> {
        self.create_department_impl(department).await
    }

    async fn get_department_by_id(&self, department_id: i64) -> Result<Option<Department>> {
        self.get_department_by_id_impl(department_id).await
    }

    async fn list_departments_with_pagination(
        &self,
        query: DepartmentListQuery,
    ) -> Result<DepartmentListResponse> {
        self.list_departments_with_pagination_impl(query).await
    }

    async fn update_department(
        &self,
        department_id: i64,
        update: UpdateDepartmentRequest,
    ) -> Result<Option<Department>> {
        self.update_department_impl(department_id, update).await
    }

    async fn delete_department(&self, department_id: i64) -> Result<bool> {
        self.delete_department_impl(department_id).await
    }

    async fn count_subjects_in_department(&self, department_id: i64) -> Result<i64> {
        self.count_subjects_in_department_impl(department_id).await
    }

    // 科目模块
    async fn create_subject(&self, subject: CreateSubjectRequest) -> Result<Subject> {
        self.create_subject_impl(subject).await
    }

    async fn get_subject_by_id(&self, subject_id: i64) -> Result<Option<Subject>> {
        self.get_subject_by_id_impl(subject_id).await
    }

    async fn list_subjects_with_pagination(
        &self,
        query: SubjectListQuery,
    ) -> Result<SubjectListResponse> {
        self.list_subjects_with_pagination_impl(query).await
    }

    async fn update_subject(
        &self,
        subject_id: i64,
        update: UpdateSubjectRequest,
    ) -> Result<Option<Subject>> {
        self.update_subject_impl(subject_id, update).await
    }

    async fn delete_subject(&self, subject_id: i64) -> Result<bool> {
        self.delete_subject_impl(subject_id).await
    }

    async fn count_classes_for_subject(&self, subject_id: i64) -> Result<i64> {
        self.count_classes_for_subject_impl(subject_id).await
    }

    // 班级模块
    async fn create_class(&self, class: CreateClassRequest, invite_code: String) -> Result<Class> {
        self.create_class_impl(class, invite_code).await
    }

    async fn get_class_by_code(&self, invite_code: &str) -> Result<Option<Class>> {
        self.get_class_by_code_impl(invite_code).await
    }

    async fn list_classes_with_pagination(
        &self,
        query: ClassListQuery,
    ) -> Result<ClassListResponse> {
        self.list_classes_with_pagination_impl(query).await
    }

    async fn update_class(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>> {
        self.update_class_impl(class_id, update).await
    }

    async fn set_class_invite_code(
        &self,
        class_id: i64,
        invite_code: String,
    ) -> Result<Option<Class>> {
        self.set_class_invite_code_impl(class_id, invite_code).await
    }

    async fn delete_class(&self, class_id: i64) -> Result<bool> {
        self.delete_class_impl(class_id).await
    }

    // 选课模块
    async fn get_enrollment_by_id(&self, enrollment_id: i64) -> Result<Option<Enrollment>> {
        self.get_enrollment_by_id_impl(enrollment_id).await
    }

    async fn list_enrollments_with_pagination(
        &self,
        query: EnrollmentListQuery,
    ) -> Result<EnrollmentListResponse> {
        self.list_enrollments_with_pagination_impl(query).await
    }

    async fn delete_enrollment(&self, enrollment_id: i64) -> Result<bool> {
        self.delete_enrollment_impl(enrollment_id).await
    }

    // 统计模块
    async fn stats_overview(&self) -> Result<OverviewStats> {
        self.stats_overview_impl().await
    }

    async fn list_class_occupancy(&self) -> Result<Vec<ClassOccupancyRow>> {
        self.list_class_occupancy_impl().await
    }

    async fn list_department_stats(&self) -> Result<Vec<DepartmentStats>> {
        self.list_department_stats_impl().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_database_url() {
        assert_eq!(
            SeaOrmStorage::build_database_url("campus.db").unwrap(),
            "sqlite://campus.db?mode=rwc"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url(":memory:").unwrap(),
            "sqlite::memory:"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url("postgres://u:p@localhost/campus").unwrap(),
            "postgres://u:p@localhost/campus"
        );
        assert!(SeaOrmStorage::build_database_url("redis://localhost").is_err());
    }

    #[test]
    fn test_page_index() {
        assert_eq!(page_index(1), 0);
        assert_eq!(page_index(0), 0);
        assert_eq!(page_index(5), 4);
    }
}
