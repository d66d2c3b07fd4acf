//! 档案存储操作
//!
//! 档案树（档案 -> 章节 -> 问题）的写入都在同一个事务中完成。

use std::collections::HashMap;

use super::{SeaOrmStorage, page_and_size};
use crate::entity::appraisals::{Column as AppraisalColumn, Entity as Appraisals};
use crate::entity::classrooms::{Column as ClassroomColumn, Entity as Classrooms};
use crate::entity::dossiers::{ActiveModel, Column, Entity as Dossiers};
use crate::entity::evaluations::{Column as EvaluationColumn, Entity as Evaluations};
use crate::entity::questions::{
    ActiveModel as QuestionActiveModel, Column as QuestionColumn, Entity as Questions,
};
use crate::entity::sections::{
    ActiveModel as SectionActiveModel, Column as SectionColumn, Entity as Sections,
};
use crate::errors::{DossierSystemError, Result};
use crate::models::{
    PaginationInfo,
    dossiers::{
        entities::{Dossier, DossierDetail, Question, SectionDetail},
        requests::{DossierListQuery, NewDossier, SectionInput, UpdateDossierRequest},
        responses::DossierListResponse,
    },
};
use crate::utils::like_contains;
use sea_orm::sea_query::{Expr, Query};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

fn txn_err(e: sea_orm::DbErr) -> DossierSystemError {
    DossierSystemError::database_operation(format!("档案事务失败: {e}"))
}

impl SeaOrmStorage {
    /// 创建档案、章节与问题
    pub async fn create_dossier_impl(&self, req: NewDossier) -> Result<DossierDetail> {
        let now = chrono::Utc::now().timestamp();

        let txn = self.db.begin().await.map_err(txn_err)?;

        let dossier = ActiveModel {
            professor_id: Set(req.professor_id),
            name: Set(req.name),
            description: Set(req.description),
            evaluation_method_id: Set(req.evaluation_method_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| DossierSystemError::from_write_err("创建档案失败", e))?;

        Self::insert_sections(&txn, dossier.id, &req.sections).await?;

        txn.commit().await.map_err(txn_err)?;

        self.get_dossier_detail_impl(dossier.id)
            .await?
            .ok_or_else(|| DossierSystemError::not_found(format!("档案不存在: {}", dossier.id)))
    }

    /// 按输入顺序插入章节及问题，position 从 0 开始
    async fn insert_sections<C: ConnectionTrait>(
        conn: &C,
        dossier_id: i64,
        sections: &[SectionInput],
    ) -> Result<()> {
        for (section_pos, input) in sections.iter().enumerate() {
            let section = SectionActiveModel {
                dossier_id: Set(dossier_id),
                name: Set(input.name.clone()),
                description: Set(input.description.clone()),
                weight: Set(input.weight),
                position: Set(section_pos as i32),
                ..Default::default()
            }
            .insert(conn)
            .await
            .map_err(|e| DossierSystemError::from_write_err("创建章节失败", e))?;

            for (question_pos, question) in input.questions.iter().enumerate() {
                QuestionActiveModel {
                    section_id: Set(section.id),
                    text: Set(question.text.clone()),
                    position: Set(question_pos as i32),
                    ..Default::default()
                }
                .insert(conn)
                .await
                .map_err(|e| DossierSystemError::from_write_err("创建问题失败", e))?;
            }
        }
        Ok(())
    }

    pub async fn get_dossier_by_id_impl(&self, id: i64) -> Result<Option<Dossier>> {
        let result = Dossiers::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| DossierSystemError::database_operation(format!("查询档案失败: {e}")))?;

        Ok(result.map(|m| m.into_dossier()))
    }

    /// 完整档案树：先查父行，再查子行，最后按外键分组
    pub async fn get_dossier_detail_impl(&self, id: i64) -> Result<Option<DossierDetail>> {
        let Some(dossier) = self.get_dossier_by_id_impl(id).await? else {
            return Ok(None);
        };

        let evaluation_method = self
            .get_evaluation_method_impl(dossier.evaluation_method_id)
            .await?
            .ok_or_else(|| {
                DossierSystemError::not_found(format!(
                    "评价方法不存在: {}",
                    dossier.evaluation_method_id
                ))
            })?;

        let sections = Sections::find()
            .filter(SectionColumn::DossierId.eq(id))
            .order_by_asc(SectionColumn::Position)
            .order_by_asc(SectionColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| DossierSystemError::database_operation(format!("查询章节失败: {e}")))?;

        let section_ids: Vec<i64> = sections.iter().map(|s| s.id).collect();
        let mut questions_by_section: HashMap<i64, Vec<Question>> = HashMap::new();
        if !section_ids.is_empty() {
            let questions = Questions::find()
                .filter(QuestionColumn::SectionId.is_in(section_ids))
                .order_by_asc(QuestionColumn::Position)
                .order_by_asc(QuestionColumn::Id)
                .all(&self.db)
                .await
                .map_err(|e| {
                    DossierSystemError::database_operation(format!("查询问题失败: {e}"))
                })?;
            for q in questions {
                questions_by_section
                    .entry(q.section_id)
                    .or_default()
                    .push(q.into_question());
            }
        }

        let sections = sections
            .into_iter()
            .map(|s| {
                let questions = questions_by_section.remove(&s.id).unwrap_or_default();
                SectionDetail {
                    section: s.into_section(),
                    questions,
                }
            })
            .collect();

        Ok(Some(DossierDetail {
            dossier,
            evaluation_method,
            sections,
        }))
    }

    /// 分页列出档案
    pub async fn list_dossiers_with_pagination_impl(
        &self,
        query: DossierListQuery,
    ) -> Result<DossierListResponse> {
        let (page, size) = page_and_size(query.page, query.size);

        let mut select = Dossiers::find();

        if let Some(professor_id) = query.professor_id {
            select = select.filter(Column::ProfessorId.eq(professor_id));
        }

        if let Some(institution_id) = query.institution_id {
            select =
                select.filter(Column::ProfessorId.in_subquery(Self::professors_of(institution_id)));
        }

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            select = select.filter(Column::Name.like(like_contains(search.trim())));
        }

        select = select.order_by_desc(Column::UpdatedAt).order_by_desc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator.num_items().await.map_err(|e| {
            DossierSystemError::database_operation(format!("查询档案总数失败: {e}"))
        })?;
        let pages = paginator.num_pages().await.map_err(|e| {
            DossierSystemError::database_operation(format!("查询档案页数失败: {e}"))
        })?;
        let dossiers = paginator.fetch_page(page - 1).await.map_err(|e| {
            DossierSystemError::database_operation(format!("查询档案列表失败: {e}"))
        })?;

        Ok(DossierListResponse {
            pagination: PaginationInfo::new(page, size, total, pages),
            items: dossiers.into_iter().map(|m| m.into_dossier()).collect(),
        })
    }

    /// 更新档案
    ///
    /// sections 存在时删除旧章节树（问题与作答随外键级联删除）并插入新树；
    /// 替换章节或更换评价方法后，该档案下的评估被重置为未评分状态
    pub async fn update_dossier_impl(
        &self,
        id: i64,
        update: UpdateDossierRequest,
    ) -> Result<Option<DossierDetail>> {
        let txn = self.db.begin().await.map_err(txn_err)?;

        let Some(existing) = Dossiers::find_by_id(id).one(&txn).await.map_err(txn_err)? else {
            return Ok(None);
        };

        let method_changed = update
            .evaluation_method_id
            .is_some_and(|m| m != existing.evaluation_method_id);

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name);
        }

        if let Some(description) = update.description {
            model.description = Set(description);
        }

        if let Some(method_id) = update.evaluation_method_id {
            model.evaluation_method_id = Set(method_id);
        }

        model
            .update(&txn)
            .await
            .map_err(|e| DossierSystemError::from_write_err("更新档案失败", e))?;

        let sections_replaced = update.sections.is_some();
        if let Some(sections) = update.sections {
            Self::clear_evaluations(&txn, id).await?;
            Sections::delete_many()
                .filter(SectionColumn::DossierId.eq(id))
                .exec(&txn)
                .await
                .map_err(|e| DossierSystemError::database_operation(format!("删除章节失败: {e}")))?;
            Self::insert_sections(&txn, id, &sections).await?;
        } else if method_changed {
            Self::clear_evaluations(&txn, id).await?;
        }

        if sections_replaced || method_changed {
            Appraisals::update_many()
                .col_expr(AppraisalColumn::Score, Expr::value(Option::<f64>::None))
                .col_expr(AppraisalColumn::Completed, Expr::value(false))
                .col_expr(
                    AppraisalColumn::UpdatedAt,
                    Expr::value(chrono::Utc::now().timestamp()),
                )
                .filter(AppraisalColumn::DossierId.eq(id))
                .exec(&txn)
                .await
                .map_err(|e| DossierSystemError::database_operation(format!("重置评估失败: {e}")))?;
        }

        txn.commit().await.map_err(txn_err)?;

        self.get_dossier_detail_impl(id).await
    }

    /// 删除该档案下所有评估的作答
    async fn clear_evaluations(txn: &DatabaseTransaction, dossier_id: i64) -> Result<()> {
        Evaluations::delete_many()
            .filter(
                EvaluationColumn::AppraisalId.in_subquery(
                    Query::select()
                        .column(AppraisalColumn::Id)
                        .from(Appraisals)
                        .and_where(AppraisalColumn::DossierId.eq(dossier_id))
                        .to_owned(),
                ),
            )
            .exec(txn)
            .await
            .map_err(|e| DossierSystemError::database_operation(format!("删除作答失败: {e}")))?;
        Ok(())
    }

    /// 删除档案：引用它的班级解除关联，评估随外键级联删除
    pub async fn delete_dossier_impl(&self, id: i64) -> Result<bool> {
        let txn = self.db.begin().await.map_err(txn_err)?;

        Classrooms::update_many()
            .col_expr(ClassroomColumn::DossierId, Expr::value(Option::<i64>::None))
            .filter(ClassroomColumn::DossierId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| DossierSystemError::database_operation(format!("解除班级档案失败: {e}")))?;

        let result = Dossiers::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| DossierSystemError::database_operation(format!("删除档案失败: {e}")))?;

        txn.commit().await.map_err(txn_err)?;

        Ok(result.rows_affected > 0)
    }
}
