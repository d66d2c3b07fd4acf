//! 班级存储操作

use std::collections::HashMap;

use super::{SeaOrmStorage, page_and_size};
use crate::entity::classroom_students::{
    Column as ClassroomStudentColumn, Entity as ClassroomStudents,
};
use crate::entity::classrooms::{ActiveModel, Column, Entity as Classrooms};
use crate::errors::{DossierSystemError, Result};
use crate::models::{
    PaginationInfo,
    classrooms::{
        entities::{Classroom, ClassroomDetail},
        requests::{ClassroomListQuery, CreateClassroomRequest, UpdateClassroomRequest},
        responses::ClassroomListResponse,
    },
};
use crate::utils::like_contains;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

impl SeaOrmStorage {
    /// 创建班级
    pub async fn create_classroom_impl(
        &self,
        professor_id: i64,
        req: CreateClassroomRequest,
    ) -> Result<Classroom> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            professor_id: Set(professor_id),
            name: Set(req.name),
            description: Set(req.description),
            dossier_id: Set(req.dossier_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DossierSystemError::from_write_err("创建班级失败", e))?;

        Ok(result.into_classroom())
    }

    /// 通过ID获取班级
    pub async fn get_classroom_by_id_impl(&self, id: i64) -> Result<Option<Classroom>> {
        let result = Classrooms::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| DossierSystemError::database_operation(format!("查询班级失败: {e}")))?;

        Ok(result.map(|m| m.into_classroom()))
    }

    /// 获取班级学生数量
    pub async fn count_classroom_students_impl(&self, classroom_id: i64) -> Result<i64> {
        let count = ClassroomStudents::find()
            .filter(ClassroomStudentColumn::ClassroomId.eq(classroom_id))
            .count(&self.db)
            .await
            .map_err(|e| {
                DossierSystemError::database_operation(format!("查询班级学生数量失败: {e}"))
            })?;

        Ok(count as i64)
    }

    /// 分页列出班级，附带每个班级的学生人数
    pub async fn list_classrooms_with_pagination_impl(
        &self,
        query: ClassroomListQuery,
    ) -> Result<ClassroomListResponse> {
        let (page, size) = page_and_size(query.page, query.size);

        let mut select = Classrooms::find();

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
            let pattern = search.trim();
            select = select.filter(
                Condition::any()
                    .add(Column::Name.like(like_contains(pattern)))
                    .add(Column::Description.like(like_contains(pattern))),
            );
        }

        select = select.order_by_desc(Column::CreatedAt).order_by_desc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator.num_items().await.map_err(|e| {
            DossierSystemError::database_operation(format!("查询班级总数失败: {e}"))
        })?;
        let pages = paginator.num_pages().await.map_err(|e| {
            DossierSystemError::database_operation(format!("查询班级页数失败: {e}"))
        })?;
        let classrooms = paginator.fetch_page(page - 1).await.map_err(|e| {
            DossierSystemError::database_operation(format!("查询班级列表失败: {e}"))
        })?;

        // 一次分组查询取回本页所有班级的人数
        let ids: Vec<i64> = classrooms.iter().map(|c| c.id).collect();
        let counts: HashMap<i64, i64> = if ids.is_empty() {
            HashMap::new()
        } else {
            ClassroomStudents::find()
                .select_only()
                .column(ClassroomStudentColumn::ClassroomId)
                .column_as(ClassroomStudentColumn::Id.count(), "student_count")
                .filter(ClassroomStudentColumn::ClassroomId.is_in(ids))
                .group_by(ClassroomStudentColumn::ClassroomId)
                .into_tuple::<(i64, i64)>()
                .all(&self.db)
                .await
                .map_err(|e| {
                    DossierSystemError::database_operation(format!("查询班级学生数量失败: {e}"))
                })?
                .into_iter()
                .collect()
        };

        let items = classrooms
            .into_iter()
            .map(|m| {
                let student_count = counts.get(&m.id).copied().unwrap_or(0);
                ClassroomDetail {
                    classroom: m.into_classroom(),
                    student_count,
                }
            })
            .collect();

        Ok(ClassroomListResponse {
            pagination: PaginationInfo::new(page, size, total, pages),
            items,
        })
    }

    /// 更新班级
    pub async fn update_classroom_impl(
        &self,
        id: i64,
        update: UpdateClassroomRequest,
    ) -> Result<Option<Classroom>> {
        if self.get_classroom_by_id_impl(id).await?.is_none() {
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

        if let Some(dossier_id) = update.dossier_id {
            model.dossier_id = Set(dossier_id);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| DossierSystemError::from_write_err("更新班级失败", e))?;

        self.get_classroom_by_id_impl(id).await
    }

    /// 删除班级（名单记录与评估由外键级联删除）
    pub async fn delete_classroom_impl(&self, id: i64) -> Result<bool> {
        let result = Classrooms::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| DossierSystemError::database_operation(format!("删除班级失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
