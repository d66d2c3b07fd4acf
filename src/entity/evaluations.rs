//! 作答实体（评估中单个问题选择的评分选项）

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "evaluations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub appraisal_id: i64,
    pub question_id: i64,
    pub evaluation_type_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::appraisals::Entity",
        from = "Column::AppraisalId",
        to = "super::appraisals::Column::Id"
    )]
    Appraisal,
    #[sea_orm(
        belongs_to = "super::questions::Entity",
        from = "Column::QuestionId",
        to = "super::questions::Column::Id"
    )]
    Question,
    #[sea_orm(
        belongs_to = "super::evaluation_types::Entity",
        from = "Column::EvaluationTypeId",
        to = "super::evaluation_types::Column::Id"
    )]
    EvaluationType,
}

impl Related<super::appraisals::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Appraisal.def()
    }
}

impl Related<super::questions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Question.def()
    }
}

impl Related<super::evaluation_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EvaluationType.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_evaluation(self) -> crate::models::appraisals::entities::Evaluation {
        crate::models::appraisals::entities::Evaluation {
            id: self.id,
            appraisal_id: self.appraisal_id,
            question_id: self.question_id,
            evaluation_type_id: self.evaluation_type_id,
        }
    }
}
