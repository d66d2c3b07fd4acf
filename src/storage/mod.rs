use std::sync::Arc;

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

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 账号管理方法
    // 创建账号（password 字段为已哈希的密码）
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取账号信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取账号信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 列出账号
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // 更新账号信息
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    // 删除账号
    async fn delete_user(&self, id: i64) -> Result<bool>;
    // 统计账号数量
    async fn count_users(&self) -> Result<u64>;
    // 列出机构名下所有教授的ID
    async fn list_professor_ids(&self, institution_id: i64) -> Result<Vec<i64>>;
    // 机构概览统计
    async fn get_institution_overview(
        &self,
        institution_id: i64,
    ) -> Result<InstitutionOverviewResponse>;

    /// 学生管理方法
    async fn create_student(&self, student: CreateStudentRequest) -> Result<Student>;
    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>>;
    async fn get_student_by_registration(&self, registration: &str) -> Result<Option<Student>>;
    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse>;
    async fn update_student(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>>;
    // 删除学生，级联删除名单记录与评估
    async fn delete_student(&self, id: i64) -> Result<bool>;

    /// 班级管理方法
    async fn create_classroom(
        &self,
        professor_id: i64,
        classroom: CreateClassroomRequest,
    ) -> Result<Classroom>;
    async fn get_classroom_by_id(&self, id: i64) -> Result<Option<Classroom>>;
    async fn count_classroom_students(&self, classroom_id: i64) -> Result<i64>;
    async fn list_classrooms_with_pagination(
        &self,
        query: ClassroomListQuery,
    ) -> Result<ClassroomListResponse>;
    async fn update_classroom(
        &self,
        id: i64,
        update: UpdateClassroomRequest,
    ) -> Result<Option<Classroom>>;
    async fn delete_classroom(&self, id: i64) -> Result<bool>;

    /// 班级名单管理方法
    async fn enroll_student(&self, classroom_id: i64, student_id: i64)
    -> Result<ClassroomStudent>;
    async fn get_enrollment(
        &self,
        classroom_id: i64,
        student_id: i64,
    ) -> Result<Option<ClassroomStudent>>;
    async fn list_roster_with_pagination(
        &self,
        classroom_id: i64,
        page: Option<i64>,
        size: Option<i64>,
    ) -> Result<RosterResponse>;
    // 班级全部学生（按姓名排序）
    async fn list_roster_students(&self, classroom_id: i64) -> Result<Vec<Student>>;
    // 移出学生，同时删除该学生在此班级的评估
    async fn remove_student_from_classroom(
        &self,
        classroom_id: i64,
        student_id: i64,
    ) -> Result<bool>;

    /// 评价方法管理方法
    async fn create_evaluation_method(
        &self,
        created_by: i64,
        method: CreateEvaluationMethodRequest,
    ) -> Result<EvaluationMethodDetail>;
    async fn get_evaluation_method(&self, id: i64) -> Result<Option<EvaluationMethodDetail>>;
    async fn list_evaluation_methods(&self) -> Result<Vec<EvaluationMethodDetail>>;
    async fn update_evaluation_method(
        &self,
        id: i64,
        update: UpdateEvaluationMethodRequest,
    ) -> Result<Option<EvaluationMethodDetail>>;
    async fn delete_evaluation_method(&self, id: i64) -> Result<bool>;
    // 使用该评价方法的档案数量
    async fn count_dossiers_using_method(&self, method_id: i64) -> Result<u64>;

    /// 档案管理方法
    // 在同一事务中创建档案、章节与问题
    async fn create_dossier(&self, dossier: NewDossier) -> Result<DossierDetail>;
    async fn get_dossier_by_id(&self, id: i64) -> Result<Option<Dossier>>;
    // 完整档案树
    async fn get_dossier_detail(&self, id: i64) -> Result<Option<DossierDetail>>;
    async fn list_dossiers_with_pagination(
        &self,
        query: DossierListQuery,
    ) -> Result<DossierListResponse>;
    // 更新档案；替换章节或更换评价方法时重置已有评估
    async fn update_dossier(
        &self,
        id: i64,
        update: UpdateDossierRequest,
    ) -> Result<Option<DossierDetail>>;
    async fn delete_dossier(&self, id: i64) -> Result<bool>;

    /// 评估管理方法
    // 新建或覆盖评估及其作答
    async fn save_appraisal(&self, appraisal: SaveAppraisal) -> Result<AppraisalDetail>;
    async fn get_appraisal_by_id(&self, id: i64) -> Result<Option<AppraisalDetail>>;
    async fn find_appraisal(
        &self,
        student_id: i64,
        classroom_id: i64,
        dossier_id: i64,
    ) -> Result<Option<AppraisalDetail>>;
    async fn list_classroom_appraisals(
        &self,
        classroom_id: i64,
        dossier_id: i64,
    ) -> Result<Vec<Appraisal>>;
    async fn delete_appraisal(&self, id: i64) -> Result<bool>;

    /// 通知管理方法
    async fn create_notification(&self, req: CreateNotificationRequest) -> Result<Notification>;
    async fn create_notifications_batch(
        &self,
        reqs: Vec<CreateNotificationRequest>,
    ) -> Result<Vec<Notification>>;
    async fn get_notification_by_id(&self, notification_id: i64)
    -> Result<Option<Notification>>;
    async fn list_notifications_with_pagination(
        &self,
        user_id: i64,
        query: NotificationListQuery,
    ) -> Result<NotificationListResponse>;
    async fn get_unread_notification_count(&self, user_id: i64) -> Result<i64>;
    async fn mark_notification_as_read(&self, notification_id: i64) -> Result<bool>;
    async fn mark_all_notifications_as_read(&self, user_id: i64) -> Result<i64>;
    async fn delete_notification(&self, notification_id: i64) -> Result<bool>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
