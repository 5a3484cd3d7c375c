//! 科目实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "subjects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub department_id: i64,
    #[sea_orm(unique)]
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::departments::Entity",
        from = "Column::DepartmentId",
        to = "super::departments::Column::Id"
    )]
    Department,
    #[sea_orm(has_many = "super::classes::Entity")]
    Classes,
}

impl Related<super::departments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

impl Related<super::classes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Classes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_subject(self) -> crate::models::subjects::entities::Subject {
        use crate::models::subjects::entities::Subject;

        Subject {
            id: self.id,
            department_id: self.department_id,
            code: self.code,
            name: self.name,
            description: self.description,
            created_at: super::timestamp_to_datetime(self.created_at),
            updated_at: super::timestamp_to_datetime(self.updated_at),
        }
    }
}
