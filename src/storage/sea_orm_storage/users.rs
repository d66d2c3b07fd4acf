use super::{SeaOrmStorage, page_and_size};
use crate::entity::appraisals::{Column as AppraisalColumn, Entity as Appraisals};
use crate::entity::classroom_students::{
    Column as ClassroomStudentColumn, Entity as ClassroomStudents,
};
use crate::entity::classrooms::{Column as ClassroomColumn, Entity as Classrooms};
use crate::entity::dossiers::{Column as DossierColumn, Entity as Dossiers};
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{DossierSystemError, Result};
use crate::models::{
    PaginationInfo,
    users::{
        entities::{User, UserRole, UserStatus},
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::{InstitutionOverviewResponse, UserListResponse},
    },
};
use crate::utils::like_contains;
use sea_orm::sea_query::{Query, SelectStatement};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

impl SeaOrmStorage {
    /// 创建账号
    pub async fn create_user_impl(&self, req: CreateUserRequest) -> Result<User> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            username: Set(req.username),
            email: Set(req.email),
            password_hash: Set(req.password),
            role: Set(req.role.to_string()),
            status: Set(UserStatus::Active.to_string()),
            email_verified: Set(req.email_verified),
            display_name: Set(req.display_name),
            institution_id: Set(req.institution_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DossierSystemError::from_write_err("创建账号失败", e))?;

        Ok(result.into_user())
    }

    /// 通过 ID 获取账号
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| DossierSystemError::database_operation(format!("查询账号失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过用户名获取账号
    pub async fn get_user_by_username_impl(&self, username: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| DossierSystemError::database_operation(format!("查询账号失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 分页列出账号
    pub async fn list_users_with_pagination_impl(
        &self,
        query: UserListQuery,
    ) -> Result<UserListResponse> {
        let (page, size) = page_and_size(query.page, query.size);

        let mut select = Users::find();

        // 搜索条件
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let pattern = search.trim();
            select = select.filter(
                Condition::any()
                    .add(Column::Username.like(like_contains(pattern)))
                    .add(Column::Email.like(like_contains(pattern)))
                    .add(Column::DisplayName.like(like_contains(pattern))),
            );
        }

        // 角色筛选
        if let Some(ref role) = query.role {
            select = select.filter(Column::Role.eq(role.to_string()));
        }

        // 状态筛选
        if let Some(ref status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        // 所属机构筛选
        if let Some(institution_id) = query.institution_id {
            select = select.filter(Column::InstitutionId.eq(institution_id));
        }

        select = select.order_by_desc(Column::CreatedAt).order_by_desc(Column::Id);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator.num_items().await.map_err(|e| {
            DossierSystemError::database_operation(format!("查询账号总数失败: {e}"))
        })?;

        let pages = paginator.num_pages().await.map_err(|e| {
            DossierSystemError::database_operation(format!("查询账号页数失败: {e}"))
        })?;

        let users = paginator.fetch_page(page - 1).await.map_err(|e| {
            DossierSystemError::database_operation(format!("查询账号列表失败: {e}"))
        })?;

        Ok(UserListResponse {
            items: users.into_iter().map(|m| m.into_user()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 更新账号信息
    pub async fn update_user_impl(
        &self,
        id: i64,
        update: UpdateUserRequest,
    ) -> Result<Option<User>> {
        // 先检查账号是否存在
        let existing = self.get_user_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(email) = update.email {
            model.email = Set(email);
        }

        if let Some(password) = update.password {
            model.password_hash = Set(password);
        }

        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        if let Some(display_name) = update.display_name {
            model.display_name = Set(Some(display_name));
        }

        if let Some(email_verified) = update.email_verified {
            model.email_verified = Set(email_verified);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| DossierSystemError::from_write_err("更新账号失败", e))?;

        self.get_user_by_id_impl(id).await
    }

    /// 删除账号
    pub async fn delete_user_impl(&self, id: i64) -> Result<bool> {
        let result = Users::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| DossierSystemError::database_operation(format!("删除账号失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 统计账号数量
    pub async fn count_users_impl(&self) -> Result<u64> {
        let count = Users::find().count(&self.db).await.map_err(|e| {
            DossierSystemError::database_operation(format!("统计账号数量失败: {e}"))
        })?;

        Ok(count)
    }

    /// 机构名下所有教授的 ID
    pub async fn list_professor_ids_impl(&self, institution_id: i64) -> Result<Vec<i64>> {
        let ids = Users::find()
            .select_only()
            .column(Column::Id)
            .filter(Column::InstitutionId.eq(institution_id))
            .filter(Column::Role.eq(UserRole::PROFESSOR))
            .order_by_asc(Column::Id)
            .into_tuple::<i64>()
            .all(&self.db)
            .await
            .map_err(|e| DossierSystemError::database_operation(format!("查询教授列表失败: {e}")))?;

        Ok(ids)
    }

    /// 机构概览统计
    pub async fn get_institution_overview_impl(
        &self,
        institution_id: i64,
    ) -> Result<InstitutionOverviewResponse> {
        let db_err =
            |e: sea_orm::DbErr| DossierSystemError::database_operation(format!("统计机构概览失败: {e}"));

        let professor_count = Users::find()
            .filter(Column::InstitutionId.eq(institution_id))
            .filter(Column::Role.eq(UserRole::PROFESSOR))
            .count(&self.db)
            .await
            .map_err(db_err)?;

        let classroom_count = Classrooms::find()
            .filter(ClassroomColumn::ProfessorId.in_subquery(Self::professors_of(institution_id)))
            .count(&self.db)
            .await
            .map_err(db_err)?;

        let enrolled_student_count = ClassroomStudents::find()
            .select_only()
            .column(ClassroomStudentColumn::StudentId)
            .distinct()
            .filter(
                ClassroomStudentColumn::ClassroomId
                    .in_subquery(Self::classrooms_of(institution_id)),
            )
            .count(&self.db)
            .await
            .map_err(db_err)?;

        let dossier_count = Dossiers::find()
            .filter(DossierColumn::ProfessorId.in_subquery(Self::professors_of(institution_id)))
            .count(&self.db)
            .await
            .map_err(db_err)?;

        let appraisal_count = Appraisals::find()
            .filter(AppraisalColumn::ClassroomId.in_subquery(Self::classrooms_of(institution_id)))
            .count(&self.db)
            .await
            .map_err(db_err)?;

        let completed_appraisal_count = Appraisals::find()
            .filter(AppraisalColumn::ClassroomId.in_subquery(Self::classrooms_of(institution_id)))
            .filter(AppraisalColumn::Completed.eq(true))
            .count(&self.db)
            .await
            .map_err(db_err)?;

        Ok(InstitutionOverviewResponse {
            professor_count: professor_count as i64,
            classroom_count: classroom_count as i64,
            enrolled_student_count: enrolled_student_count as i64,
            dossier_count: dossier_count as i64,
            appraisal_count: appraisal_count as i64,
            completed_appraisal_count: completed_appraisal_count as i64,
        })
    }

    /// 子查询：某机构名下教授的所有班级ID
    fn classrooms_of(institution_id: i64) -> SelectStatement {
        Query::select()
            .column(ClassroomColumn::Id)
            .from(Classrooms)
            .and_where(ClassroomColumn::ProfessorId.in_subquery(Self::professors_of(institution_id)))
            .to_owned()
    }
}
