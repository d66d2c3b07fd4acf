//! 数据模型定义
//!
//! 每个资源按 entities / requests / responses 拆分，
//! 数据库实体位于 `crate::entity`，在存储层转换为这里的业务实体。

pub mod appraisals;
pub mod classrooms;
pub mod common;
pub mod dossiers;
pub mod evaluation_methods;
pub mod notifications;
pub mod students;
pub mod system;
pub mod users;

pub use common::pagination::{PaginationInfo, PaginationQuery};
pub use common::response::ApiResponse;

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 业务错误码
///
/// 0 表示成功；1xxx 通用；2xxx 账号；3xxx 学生；4xxx 班级；
/// 5xxx 评价方法与档案；6xxx 评估；7xxx 通知
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1009,
    InternalServerError = 1050,

    // 账号
    UserNotFound = 2000,
    UserAlreadyExists = 2001,
    UserNameInvalid = 2002,
    UserEmailInvalid = 2003,
    UserPasswordInvalid = 2004,
    UserCreationFailed = 2005,
    UserUpdateFailed = 2006,
    UserDeleteFailed = 2007,

    // 学生
    StudentNotFound = 3000,
    StudentAlreadyExists = 3001,
    StudentDataInvalid = 3002,

    // 班级
    ClassroomNotFound = 4000,
    ClassroomPermissionDenied = 4001,
    ClassroomDataInvalid = 4002,
    ClassroomStudentNotFound = 4003,
    ClassroomStudentAlreadyExists = 4004,
    ClassroomWithoutDossier = 4005,

    // 评价方法
    EvaluationMethodNotFound = 5000,
    EvaluationMethodInvalid = 5001,
    EvaluationMethodInUse = 5002,

    // 档案
    DossierNotFound = 5100,
    DossierInvalid = 5101,
    DossierPermissionDenied = 5102,

    // 评估
    AppraisalNotFound = 6000,
    AppraisalAnswerInvalid = 6001,

    // 通知
    NotificationNotFound = 7000,
}
