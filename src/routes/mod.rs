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

pub use appraisals::configure_appraisals_routes;
pub use classrooms::configure_classrooms_routes;
pub use dossiers::configure_dossiers_routes;
pub use evaluation_methods::configure_evaluation_methods_routes;
pub use institutions::configure_institutions_routes;
pub use notifications::configure_notifications_routes;
pub use professors::configure_professors_routes;
pub use students::configure_students_routes;
pub use system::configure_system_routes;
pub use users::configure_user_routes;

use actix_web::web;

/// 注册全部 API 路由
pub fn configure_api_routes(cfg: &mut web::ServiceConfig) {
    configure_system_routes(cfg);
    configure_user_routes(cfg);
    configure_professors_routes(cfg);
    configure_institutions_routes(cfg);
    configure_students_routes(cfg);
    configure_classrooms_routes(cfg);
    configure_evaluation_methods_routes(cfg);
    configure_dossiers_routes(cfg);
    configure_appraisals_routes(cfg);
    configure_notifications_routes(cfg);
}
