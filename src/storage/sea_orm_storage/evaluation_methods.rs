//! 评价方法存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::dossiers::{Column as DossierColumn, Entity as Dossiers};
use crate::entity::evaluation_methods::{ActiveModel, Column, Entity as EvaluationMethods};
use crate::entity::evaluation_types::{
    ActiveModel as TypeActiveModel, Column as TypeColumn, Entity as EvaluationTypes,
};
use crate::errors::{DossierSystemError, Result};
use crate::models::evaluation_methods::{
    entities::{EvaluationMethodDetail, EvaluationType},
    requests::{
        CreateEvaluationMethodRequest, EvaluationTypeInput, UpdateEvaluationMethodRequest,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建评价方法及其选项
    pub async fn create_evaluation_method_impl(
        &self,
        created_by: i64,
        req: CreateEvaluationMethodRequest,
    ) -> Result<EvaluationMethodDetail> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| DossierSystemError::database_operation(format!("开启事务失败: {e}")))?;

        let method = ActiveModel {
            name: Set(req.name),
            description: Set(req.description),
            created_by: Set(Some(created_by)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| DossierSystemError::from_write_err("创建评价方法失败", e))?;

        let types = Self::insert_evaluation_types(&txn, method.id, &req.types).await?;

        txn.commit()
            .await
            .map_err(|e| DossierSystemError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(EvaluationMethodDetail {
            method: method.into_evaluation_method(),
            types,
        })
    }

    /// 按输入顺序插入选项，position 从 0 开始
    async fn insert_evaluation_types<C: ConnectionTrait>(
        conn: &C,
        method_id: i64,
        inputs: &[EvaluationTypeInput],
    ) -> Result<Vec<EvaluationType>> {
        let mut types = Vec::with_capacity(inputs.len());
        for (position, input) in inputs.iter().enumerate() {
            let model = TypeActiveModel {
                method_id: Set(method_id),
                name: Set(input.name.clone()),
                value: Set(input.value),
                position: Set(position as i32),
                ..Default::default()
            }
            .insert(conn)
            .await
            .map_err(|e| DossierSystemError::from_write_err("创建评分选项失败", e))?;
            types.push(model.into_evaluation_type());
        }
        Ok(types)
    }

    pub async fn get_evaluation_method_impl(
        &self,
        id: i64,
    ) -> Result<Option<EvaluationMethodDetail>> {
        let Some(method) = EvaluationMethods::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| DossierSystemError::database_operation(format!("查询评价方法失败: {e}")))?
        else {
            return Ok(None);
        };

        let types = EvaluationTypes::find()
            .filter(TypeColumn::MethodId.eq(id))
            .order_by_asc(TypeColumn::Position)
            .order_by_asc(TypeColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| DossierSystemError::database_operation(format!("查询评分选项失败: {e}")))?;

        Ok(Some(EvaluationMethodDetail {
            method: method.into_evaluation_method(),
            types: types.into_iter().map(|m| m.into_evaluation_type()).collect(),
        }))
    }

    /// 列出所有评价方法（先查方法，再一次性查出全部选项后分组）
    pub async fn list_evaluation_methods_impl(&self) -> Result<Vec<EvaluationMethodDetail>> {
        let methods = EvaluationMethods::find()
            .order_by_asc(Column::Name)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DossierSystemError::database_operation(format!("查询评价方法失败: {e}")))?;

        let ids: Vec<i64> = methods.iter().map(|m| m.id).collect();
        let mut grouped: HashMap<i64, Vec<EvaluationType>> = HashMap::new();
        if !ids.is_empty() {
            let types = EvaluationTypes::find()
                .filter(TypeColumn::MethodId.is_in(ids))
                .order_by_asc(TypeColumn::Position)
                .order_by_asc(TypeColumn::Id)
                .all(&self.db)
                .await
                .map_err(|e| {
                    DossierSystemError::database_operation(format!("查询评分选项失败: {e}"))
                })?;
            for t in types {
                grouped
                    .entry(t.method_id)
                    .or_default()
                    .push(t.into_evaluation_type());
            }
        }

        Ok(methods
            .into_iter()
            .map(|m| {
                let types = grouped.remove(&m.id).unwrap_or_default();
                EvaluationMethodDetail {
                    method: m.into_evaluation_method(),
                    types,
                }
            })
            .collect())
    }

    /// 更新评价方法；types 存在时整体替换选项
    pub async fn update_evaluation_method_impl(
        &self,
        id: i64,
        update: UpdateEvaluationMethodRequest,
    ) -> Result<Option<EvaluationMethodDetail>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| DossierSystemError::database_operation(format!("开启事务失败: {e}")))?;

        let exists = EvaluationMethods::find_by_id(id)
            .one(&txn)
            .await
            .map_err(|e| DossierSystemError::database_operation(format!("查询评价方法失败: {e}")))?
            .is_some();
        if !exists {
            return Ok(None);
        }

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

        model
            .update(&txn)
            .await
            .map_err(|e| DossierSystemError::from_write_err("更新评价方法失败", e))?;

        if let Some(types) = update.types {
            EvaluationTypes::delete_many()
                .filter(TypeColumn::MethodId.eq(id))
                .exec(&txn)
                .await
                .map_err(|e| {
                    DossierSystemError::database_operation(format!("删除评分选项失败: {e}"))
                })?;
            Self::insert_evaluation_types(&txn, id, &types).await?;
        }

        txn.commit()
            .await
            .map_err(|e| DossierSystemError::database_operation(format!("提交事务失败: {e}")))?;

        self.get_evaluation_method_impl(id).await
    }

    /// 删除评价方法（被档案引用时数据库拒绝删除，映射为 Validation）
    pub async fn delete_evaluation_method_impl(&self, id: i64) -> Result<bool> {
        let result = EvaluationMethods::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| DossierSystemError::from_write_err("删除评价方法失败", e))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count_dossiers_using_method_impl(&self, method_id: i64) -> Result<u64> {
        Dossiers::find()
            .filter(DossierColumn::EvaluationMethodId.eq(method_id))
            .count(&self.db)
            .await
            .map_err(|e| DossierSystemError::database_operation(format!("统计档案数量失败: {e}")))
    }
}
