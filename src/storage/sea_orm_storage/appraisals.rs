//! 评估存储操作

use super::SeaOrmStorage;
use crate::entity::appraisals::{ActiveModel, Column, Entity as Appraisals, Model};
use crate::entity::evaluations::{
    ActiveModel as EvaluationActiveModel, Column as EvaluationColumn, Entity as Evaluations,
};
use crate::errors::{DossierSystemError, Result};
use crate::models::appraisals::{
    entities::{Appraisal, AppraisalDetail},
    requests::SaveAppraisal,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    /// 保存评估：不存在则创建，存在则覆盖分数并替换全部作答
    pub async fn save_appraisal_impl(&self, req: SaveAppraisal) -> Result<AppraisalDetail> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| DossierSystemError::database_operation(format!("开启事务失败: {e}")))?;

        let existing = Appraisals::find()
            .filter(Column::StudentId.eq(req.student_id))
            .filter(Column::ClassroomId.eq(req.classroom_id))
            .filter(Column::DossierId.eq(req.dossier_id))
            .one(&txn)
            .await
            .map_err(|e| DossierSystemError::database_operation(format!("查询评估失败: {e}")))?;

        let appraisal = match existing {
            Some(found) => {
                Evaluations::delete_many()
                    .filter(EvaluationColumn::AppraisalId.eq(found.id))
                    .exec(&txn)
                    .await
                    .map_err(|e| {
                        DossierSystemError::database_operation(format!("删除旧作答失败: {e}"))
                    })?;

                let mut model: ActiveModel = found.into();
                model.professor_id = Set(Some(req.professor_id));
                model.score = Set(Some(req.score));
                model.completed = Set(req.completed);
                model.updated_at = Set(now);
                model
                    .update(&txn)
                    .await
                    .map_err(|e| DossierSystemError::from_write_err("更新评估失败", e))?
            }
            None => ActiveModel {
                student_id: Set(req.student_id),
                classroom_id: Set(req.classroom_id),
                dossier_id: Set(req.dossier_id),
                professor_id: Set(Some(req.professor_id)),
                score: Set(Some(req.score)),
                completed: Set(req.completed),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(|e| DossierSystemError::from_write_err("创建评估失败", e))?,
        };

        for answer in &req.answers {
            EvaluationActiveModel {
                appraisal_id: Set(appraisal.id),
                question_id: Set(answer.question_id),
                evaluation_type_id: Set(answer.evaluation_type_id),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(|e| DossierSystemError::from_write_err("保存作答失败", e))?;
        }

        let detail = Self::load_appraisal_detail(&txn, appraisal).await?;

        txn.commit()
            .await
            .map_err(|e| DossierSystemError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(detail)
    }

    async fn load_appraisal_detail<C: ConnectionTrait>(
        conn: &C,
        appraisal: Model,
    ) -> Result<AppraisalDetail> {
        let answers = Evaluations::find()
            .filter(EvaluationColumn::AppraisalId.eq(appraisal.id))
            .order_by_asc(EvaluationColumn::Id)
            .all(conn)
            .await
            .map_err(|e| DossierSystemError::database_operation(format!("查询作答失败: {e}")))?;

        Ok(AppraisalDetail {
            appraisal: appraisal.into_appraisal(),
            answers: answers.into_iter().map(|m| m.into_evaluation()).collect(),
        })
    }

    pub async fn get_appraisal_by_id_impl(&self, id: i64) -> Result<Option<AppraisalDetail>> {
        let found = Appraisals::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| DossierSystemError::database_operation(format!("查询评估失败: {e}")))?;

        match found {
            Some(model) => Ok(Some(Self::load_appraisal_detail(&self.db, model).await?)),
            None => Ok(None),
        }
    }

    pub async fn find_appraisal_impl(
        &self,
        student_id: i64,
        classroom_id: i64,
        dossier_id: i64,
    ) -> Result<Option<AppraisalDetail>> {
        let found = Appraisals::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::ClassroomId.eq(classroom_id))
            .filter(Column::DossierId.eq(dossier_id))
            .one(&self.db)
            .await
            .map_err(|e| DossierSystemError::database_operation(format!("查询评估失败: {e}")))?;

        match found {
            Some(model) => Ok(Some(Self::load_appraisal_detail(&self.db, model).await?)),
            None => Ok(None),
        }
    }

    /// 班级在某档案下的全部评估
    pub async fn list_classroom_appraisals_impl(
        &self,
        classroom_id: i64,
        dossier_id: i64,
    ) -> Result<Vec<Appraisal>> {
        let appraisals = Appraisals::find()
            .filter(Column::ClassroomId.eq(classroom_id))
            .filter(Column::DossierId.eq(dossier_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DossierSystemError::database_operation(format!("查询班级评估失败: {e}")))?;

        Ok(appraisals.into_iter().map(|m| m.into_appraisal()).collect())
    }

    /// 删除评估（作答随外键级联删除）
    pub async fn delete_appraisal_impl(&self, id: i64) -> Result<bool> {
        let result = Appraisals::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| DossierSystemError::database_operation(format!("删除评估失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
