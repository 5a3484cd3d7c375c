//! 班级实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "classes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub subject_id: i64,
    pub teacher_id: String,
    pub name: String,
    pub description: Option<String>,
    pub capacity: i32,
    pub status: String,
    #[sea_orm(unique)]
    pub invite_code: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::subjects::Entity",
        from = "Column::SubjectId",
        to = "super::subjects::Column::Id"
    )]
    Subject,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::TeacherId",
        to = "super::users::Column::Id"
    )]
    Teacher,
    #[sea_orm(has_many = "super::enrollments::Entity")]
    Enrollments,
}

impl Related<super::subjects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subject.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl Related<super::enrollments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enrollments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_class(self) -> crate::models::classes::entities::Class {
        use crate::models::classes::entities::{Class, ClassStatus};

        Class {
            id: self.id,
            subject_id: self.subject_id,
            teacher_id: self.teacher_id,
            name: self.name,
            description: self.description,
            capacity: self.capacity,
            // 未知状态按未开放处理，避免误开放选课
            status: self
                .status
                .parse::<ClassStatus>()
                .unwrap_or(ClassStatus::Inactive),
            invite_code: self.invite_code,
            created_at: super::timestamp_to_datetime(self.created_at),
            updated_at: super::timestamp_to_datetime(self.updated_at),
        }
    }
}
