//! 档案章节实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "sections")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub dossier_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub weight: f64,
    pub position: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::dossiers::Entity",
        from = "Column::DossierId",
        to = "super::dossiers::Column::Id"
    )]
    Dossier,
    #[sea_orm(has_many = "super::questions::Entity")]
    Questions,
}

impl Related<super::dossiers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Dossier.def()
    }
}

impl Related<super::questions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Questions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_section(self) -> crate::models::dossiers::entities::Section {
        crate::models::dossiers::entities::Section {
            id: self.id,
            dossier_id: self.dossier_id,
            name: self.name,
            description: self.description,
            weight: self.weight,
            position: self.position,
        }
    }
}
