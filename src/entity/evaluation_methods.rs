//! 评价方法实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "evaluation_methods")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_by: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::evaluation_types::Entity")]
    EvaluationTypes,
    #[sea_orm(has_many = "super::dossiers::Entity")]
    Dossiers,
}

impl Related<super::evaluation_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EvaluationTypes.def()
    }
}

impl Related<super::dossiers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Dossiers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_evaluation_method(
        self,
    ) -> crate::models::evaluation_methods::entities::EvaluationMethod {
        crate::models::evaluation_methods::entities::EvaluationMethod {
            id: self.id,
            name: self.name,
            description: self.description,
            created_by: self.created_by,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
