//! 档案实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "dossiers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub professor_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub evaluation_method_id: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::ProfessorId",
        to = "super::users::Column::Id"
    )]
    Professor,
    #[sea_orm(
        belongs_to = "super::evaluation_methods::Entity",
        from = "Column::EvaluationMethodId",
        to = "super::evaluation_methods::Column::Id"
    )]
    EvaluationMethod,
    #[sea_orm(has_many = "super::sections::Entity")]
    Sections,
    #[sea_orm(has_many = "super::classrooms::Entity")]
    Classrooms,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Professor.def()
    }
}

impl Related<super::evaluation_methods::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EvaluationMethod.def()
    }
}

impl Related<super::sections::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sections.def()
    }
}

impl Related<super::classrooms::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Classrooms.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_dossier(self) -> crate::models::dossiers::entities::Dossier {
        crate::models::dossiers::entities::Dossier {
            id: self.id,
            professor_id: self.professor_id,
            name: self.name,
            description: self.description,
            evaluation_method_id: self.evaluation_method_id,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
