//! 评分选项实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "evaluation_types")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub method_id: i64,
    pub name: String,
    pub value: f64,
    pub position: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::evaluation_methods::Entity",
        from = "Column::MethodId",
        to = "super::evaluation_methods::Column::Id"
    )]
    Method,
}

impl Related<super::evaluation_methods::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Method.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_evaluation_type(self) -> crate::models::evaluation_methods::entities::EvaluationType {
        crate::models::evaluation_methods::entities::EvaluationType {
            id: self.id,
            method_id: self.method_id,
            name: self.name,
            value: self.value,
            position: self.position,
        }
    }
}
