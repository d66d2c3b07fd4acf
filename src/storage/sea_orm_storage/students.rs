//! 学生存储操作

use super::{SeaOrmStorage, page_and_size};
use crate::entity::students::{ActiveModel, Column, Entity as Students};
use crate::errors::{DossierSystemError, Result};
use crate::models::{
    PaginationInfo,
    students::{
        entities::Student,
        requests::{CreateStudentRequest, StudentListQuery, UpdateStudentRequest},
        responses::StudentListResponse,
    },
};
use crate::utils::like_contains;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    /// 创建学生
    pub async fn create_student_impl(&self, req: CreateStudentRequest) -> Result<Student> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            registration: Set(req.registration),
            name: Set(req.name),
            email: Set(req.email),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DossierSystemError::from_write_err("创建学生失败", e))?;

        Ok(result.into_student())
    }

    pub async fn get_student_by_id_impl(&self, id: i64) -> Result<Option<Student>> {
        let result = Students::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| DossierSystemError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    pub async fn get_student_by_registration_impl(
        &self,
        registration: &str,
    ) -> Result<Option<Student>> {
        let result = Students::find()
            .filter(Column::Registration.eq(registration))
            .one(&self.db)
            .await
            .map_err(|e| DossierSystemError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    /// 分页列出学生（按姓名排序）
    pub async fn list_students_with_pagination_impl(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse> {
        let (page, size) = page_and_size(query.page, query.size);

        let mut select = Students::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let pattern = search.trim();
            select = select.filter(
                Condition::any()
                    .add(Column::Name.like(like_contains(pattern)))
                    .add(Column::Registration.like(like_contains(pattern))),
            );
        }

        select = select.order_by_asc(Column::Name).order_by_asc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator.num_items().await.map_err(|e| {
            DossierSystemError::database_operation(format!("查询学生总数失败: {e}"))
        })?;
        let pages = paginator.num_pages().await.map_err(|e| {
            DossierSystemError::database_operation(format!("查询学生页数失败: {e}"))
        })?;
        let students = paginator.fetch_page(page - 1).await.map_err(|e| {
            DossierSystemError::database_operation(format!("查询学生列表失败: {e}"))
        })?;

        Ok(StudentListResponse {
            items: students.into_iter().map(|m| m.into_student()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 更新学生；email 传空字符串表示清除
    pub async fn update_student_impl(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        if self.get_student_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(registration) = update.registration {
            model.registration = Set(registration);
        }

        if let Some(name) = update.name {
            model.name = Set(name);
        }

        if let Some(email) = update.email {
            model.email = Set(if email.is_empty() { None } else { Some(email) });
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| DossierSystemError::from_write_err("更新学生失败", e))?;

        self.get_student_by_id_impl(id).await
    }

    /// 删除学生（名单记录与评估由外键级联删除）
    pub async fn delete_student_impl(&self, id: i64) -> Result<bool> {
        let result = Students::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| DossierSystemError::database_operation(format!("删除学生失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
