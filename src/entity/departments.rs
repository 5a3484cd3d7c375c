//! 院系实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "departments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::subjects::Entity")]
    Subjects,
}

impl Related<super::subjects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subjects.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_department(self) -> crate::models::departments::entities::Department {
        use crate::models::departments::entities::Department;

        Department {
            id: self.id,
            code: self.code,
            name: self.name,
            description: self.description,
            created_at: super::timestamp_to_datetime(self.created_at),
            updated_at: super::timestamp_to_datetime(self.updated_at),
        }
    }
}
