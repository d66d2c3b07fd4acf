use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::users::entities::UserRole;
use crate::services::InstitutionService;

// 懒加载的全局 InstitutionService 实例
static INSTITUTION_SERVICE: Lazy<InstitutionService> = Lazy::new(InstitutionService::new_lazy);

pub async fn get_overview(req: HttpRequest) -> ActixResult<HttpResponse> {
    INSTITUTION_SERVICE.get_overview(&req).await
}

// 配置路由
pub fn configure_institutions_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/institutions")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new(&UserRole::Institution))
                    .route("/overview", web::get().to(get_overview)),
            ),
    );
}
