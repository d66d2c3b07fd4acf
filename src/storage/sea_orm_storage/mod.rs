//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod appraisals;
mod classroom_students;
mod classrooms;
mod dossiers;
mod evaluation_methods;
mod notifications;
mod students;
mod users;

use crate::config::{AppConfig, DatabaseConfig};
use crate::entity::users as users_entity;
use crate::errors::{DossierSystemError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::sea_query::{Query, SelectStatement};
use sea_orm::{ColumnTrait, ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 使用全局配置创建存储实例
    pub async fn new_async() -> Result<Self> {
        Self::connect(&AppConfig::get().database).await
    }

    /// 按给定数据库配置连接并运行迁移
    pub async fn connect(database: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, database).await?
        } else {
            Self::connect_generic(&db_url, database).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| DossierSystemError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM storage initialized, database: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    ///
    /// 内存数据库只能使用单个常驻连接，否则每个连接都会看到一个新的空库
    async fn connect_sqlite(url: &str, database: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let in_memory = url.contains(":memory:");

        let mut opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| DossierSystemError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5));

        if !in_memory {
            opt = opt
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .pragma("cache_size", "-64000")
                .pragma("temp_store", "memory")
                .pragma("mmap_size", "536870912")
                .pragma("wal_autocheckpoint", "1000");
        }

        let mut pool = SqlitePoolOptions::new()
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(database.timeout));

        pool = if in_memory {
            pool.max_connections(1).idle_timeout(None).max_lifetime(None)
        } else {
            pool.max_connections(database.pool_size.max(1))
                .idle_timeout(Duration::from_secs(300))
        };

        let pool = pool.connect_with(opt).await.map_err(|e| {
            DossierSystemError::database_connection(format!("SQLite 连接失败: {e}"))
        })?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, database: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(database.pool_size)
            .min_connections(database.pool_size.min(5))
            .connect_timeout(Duration::from_secs(database.timeout))
            .acquire_timeout(Duration::from_secs(database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| DossierSystemError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(DossierSystemError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite:, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }

    /// 子查询：某机构名下所有教授的ID
    pub(crate) fn professors_of(institution_id: i64) -> SelectStatement {
        Query::select()
            .column(users_entity::Column::Id)
            .from(users_entity::Entity)
            .and_where(users_entity::Column::InstitutionId.eq(institution_id))
            .to_owned()
    }
}

/// 规范化存储层分页参数
pub(crate) fn page_and_size(page: Option<i64>, size: Option<i64>) -> (u64, u64) {
    crate::models::common::pagination::normalize_page(page, size)
}

// Storage trait 实现
use crate::models::{
    appraisals::{
        entities::{Appraisal, AppraisalDetail},
        requests::SaveAppraisal,
    },
    classrooms::{
        entities::{Classroom, ClassroomStudent},
        requests::{ClassroomListQuery, CreateClassroomRequest, UpdateClassroomRequest},
        responses::{ClassroomListResponse, RosterResponse},
    },
    dossiers::{
        entities::{Dossier, DossierDetail},
        requests::{DossierListQuery, NewDossier, UpdateDossierRequest},
        responses::DossierListResponse,
    },
    evaluation_methods::{
        entities::EvaluationMethodDetail,
        requests::{CreateEvaluationMethodRequest, UpdateEvaluationMethodRequest},
    },
    notifications::{
        entities::Notification,
        requests::{CreateNotificationRequest, NotificationListQuery},
        responses::NotificationListResponse,
    },
    students::{
        entities::Student,
        requests::{CreateStudentRequest, StudentListQuery, UpdateStudentRequest},
        responses::StudentListResponse,
    },
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::{InstitutionOverviewResponse, UserListResponse},
    },
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 账号模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    async fn list_professor_ids(&self, institution_id: i64) -> Result<Vec<i64>> {
        self.list_professor_ids_impl(institution_id).await
    }

    async fn get_institution_overview(
        &self,
        institution_id: i64,
    ) -> Result<InstitutionOverviewResponse> {
        self.get_institution_overview_impl(institution_id).await
    }

    // 学生模块
    async fn create_student(&self, student: CreateStudentRequest) -> Result<Student> {
        self.create_student_impl(student).await
    }

    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>> {
        self.get_student_by_id_impl(id).await
    }

    async fn get_student_by_registration(&self, registration: &str) -> Result<Option<Student>> {
        self.get_student_by_registration_impl(registration).await
    }

    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse> {
        self.list_students_with_pagination_impl(query).await
    }

    async fn update_student(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        self.update_student_impl(id, update).await
    }

    async fn delete_student(&self, id: i64) -> Result<bool> {
        self.delete_student_impl(id).await
    }

    // 班级模块
    async fn create_classroom(
        &self,
        professor_id: i64,
        classroom: CreateClassroomRequest,
    ) -> Result<Classroom> {
        self.create_classroom_impl(professor_id, classroom).await
    }

    async fn get_classroom_by_id(&self, id: i64) -> Result<Option<Classroom>> {
        self.get_classroom_by_id_impl(id).await
    }

    async fn count_classroom_students(&self, classroom_id: i64) -> Result<i64> {
        self.count_classroom_students_impl(classroom_id).await
    }

    async fn list_classrooms_with_pagination(
        &self,
        query: ClassroomListQuery,
    ) -> Result<ClassroomListResponse> {
        self.list_classrooms_with_pagination_impl(query).await
    }

    async fn update_classroom(
        &self,
        id: i64,
        update: UpdateClassroomRequest,
    ) -> Result<Option<Classroom>> {
        self.update_classroom_impl(id, update).await
    }

    async fn delete_classroom(&self, id: i64) -> Result<bool> {
        self.delete_classroom_impl(id).await
    }

    // 班级名单模块
    async fn enroll_student(
        &self,
        classroom_id: i64,
        student_id: i64,
    ) -> Result<ClassroomStudent> {
        self.enroll_student_impl(classroom_id, student_id).await
    }

    async fn get_enrollment(
        &self,
        classroom_id: i64,
        student_id: i64,
    ) -> Result<Option<ClassroomStudent>> {
        self.get_enrollment_impl(classroom_id, student_id).await
    }

    async fn list_roster_with_pagination(
        &self,
        classroom_id: i64,
        page: Option<i64>,
        size: Option<i64>,
    ) -> Result<RosterResponse> {
        self.list_roster_with_pagination_impl(classroom_id, page, size)
            .await
    }

    async fn list_roster_students(&self, classroom_id: i64) -> Result<Vec<Student>> {
        self.list_roster_students_impl(classroom_id).await
    }

    async fn remove_student_from_classroom(
        &self,
        classroom_id: i64,
        student_id: i64,
    ) -> Result<bool> {
        self.remove_student_from_classroom_impl(classroom_id, student_id)
            .await
    }

    // 评价方法模块
    async fn create_evaluation_method(
        &self,
        created_by: i64,
        method: CreateEvaluationMethodRequest,
    ) -> Result<EvaluationMethodDetail> {
        self.create_evaluation_method_impl(created_by, method).await
    }

    async fn get_evaluation_method(&self, id: i64) -> Result<Option<EvaluationMethodDetail>> {
        self.get_evaluation_method_impl(id).await
    }

    async fn list_evaluation_methods(&self) -> Result<Vec<EvaluationMethodDetail>> {
        self.list_evaluation_methods_impl().await
    }

    async fn update_evaluation_method(
        &self,
        id: i64,
        update: UpdateEvaluationMethodRequest,
    ) -> Result<Option<EvaluationMethodDetail>> {
        self.update_evaluation_method_impl(id, update).await
    }

    async fn delete_evaluation_method(&self, id: i64) -> Result<bool> {
        self.delete_evaluation_method_impl(id).await
    }

    async fn count_dossiers_using_method(&self, method_id: i64) -> Result<u64> {
        self.count_dossiers_using_method_impl(method_id).await
    }

    // 档案模块
    async fn create_dossier(&self, dossier: NewDossier) -> Result<DossierDetail> {
        self.create_dossier_impl(dossier).await
    }

    async fn get_dossier_by_id(&self, id: i64) -> Result<Option<Dossier>> {
        self.get_dossier_by_id_impl(id).await
    }

    async fn get_dossier_detail(&self, id: i64) -> Result<Option<DossierDetail>> {
        self.get_dossier_detail_impl(id).await
    }

    async fn list_dossiers_with_pagination(
        &self,
        query: DossierListQuery,
    ) -> Result<DossierListResponse> {
        self.list_dossiers_with_pagination_impl(query).await
    }

    async fn update_dossier(
        &self,
        id: i64,
        update: UpdateDossierRequest,
    ) -> Result<Option<DossierDetail>> {
        self.update_dossier_impl(id, update).await
    }

    async fn delete_dossier(&self, id: i64) -> Result<bool> {
        self.delete_dossier_impl(id).await
    }

    // 评估模块
    async fn save_appraisal(&self, appraisal: SaveAppraisal) -> Result<AppraisalDetail> {
        self.save_appraisal_impl(appraisal).await
    }

    async fn get_appraisal_by_id(&self, id: i64) -> Result<Option<AppraisalDetail>> {
        self.get_appraisal_by_id_impl(id).await
    }

    async fn find_appraisal(
        &self,
        student_id: i64,
        classroom_id: i64,
        dossier_id: i64,
    ) -> Result<Option<AppraisalDetail>> {
        self.find_appraisal_impl(student_id, classroom_id, dossier_id)
            .await
    }

    async fn list_classroom_appraisals(
        &self,
        classroom_id: i64,
        dossier_id: i64,
    ) -> Result<Vec<Appraisal>> {
        self.list_classroom_appraisals_impl(classroom_id, dossier_id)
            .await
    }

    async fn delete_appraisal(&self, id: i64) -> Result<bool> {
        self.delete_appraisal_impl(id).await
    }

    // 通知模块
    async fn create_notification(&self, req: CreateNotificationRequest) -> Result<Notification> {
        self.create_notification_impl(req).await
    }

    async fn create_notifications_batch(
        &self,
        reqs: Vec<CreateNotificationRequest>,
    ) -> Result<Vec<Notification>> {
        self.create_notifications_batch_impl(reqs).await
    }

    async fn get_notification_by_id(
        &self,
        notification_id: i64,
    ) -> Result<Option<Notification>> {
        self.get_notification_by_id_impl(notification_id).await
    }

    async fn list_notifications_with_pagination(
        &self,
        user_id: i64,
        query: NotificationListQuery,
    ) -> Result<NotificationListResponse> {
        self.list_notifications_with_pagination_impl(user_id, query)
            .await
    }

    async fn get_unread_notification_count(&self, user_id: i64) -> Result<i64> {
        self.get_unread_notification_count_impl(user_id).await
    }

    async fn mark_notification_as_read(&self, notification_id: i64) -> Result<bool> {
        self.mark_notification_as_read_impl(notification_id).await
    }

    async fn mark_all_notifications_as_read(&self, user_id: i64) -> Result<i64> {
        self.mark_all_notifications_as_read_impl(user_id).await
    }

    async fn delete_notification(&self, notification_id: i64) -> Result<bool> {
        self.delete_notification_impl(notification_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_database_url() {
        assert_eq!(
            SeaOrmStorage::build_database_url("dossier.db").unwrap(),
            "sqlite://dossier.db?mode=rwc"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url(":memory:").unwrap(),
            "sqlite::memory:"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url("postgres://u:p@localhost/db").unwrap(),
            "postgres://u:p@localhost/db"
        );
        assert!(SeaOrmStorage::build_database_url("ftp://nowhere").is_err());
    }
}
