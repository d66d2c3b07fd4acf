pub mod access;
pub mod appraisals;
pub mod classrooms;
pub mod dossiers;
pub mod evaluation_methods;
pub mod institutions;
pub mod notifications;
pub mod professors;
pub mod students;
pub mod system;
pub mod users;

pub use appraisals::AppraisalService;
pub use classrooms::ClassroomService;
pub use dossiers::DossierService;
pub use evaluation_methods::EvaluationMethodService;
pub use institutions::InstitutionService;
pub use notifications::NotificationService;
pub use professors::ProfessorService;
pub use students::StudentService;
pub use system::SystemService;
pub use users::UserService;

use std::sync::Arc;

use actix_web::HttpRequest;

use crate::storage::Storage;

// 从 app_data 取得全局存储；未注册存储属于启动配置错误
pub(crate) fn storage_from_request(request: &HttpRequest) -> Arc<dyn Storage> {
    request
        .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
        .expect("Storage not found in app data")
        .get_ref()
        .clone()
}
