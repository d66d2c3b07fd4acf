use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::services::AppraisalService;
use crate::utils::SafeAppraisalIdI64;

// 懒加载的全局 AppraisalService 实例
static APPRAISAL_SERVICE: Lazy<AppraisalService> = Lazy::new(AppraisalService::new_lazy);

// HTTP处理程序
pub async fn get_appraisal(
    req: HttpRequest,
    appraisal_id: SafeAppraisalIdI64,
) -> ActixResult<HttpResponse> {
    APPRAISAL_SERVICE.get_appraisal(&req, appraisal_id.0).await
}

pub async fn get_report(
    req: HttpRequest,
    appraisal_id: SafeAppraisalIdI64,
) -> ActixResult<HttpResponse> {
    APPRAISAL_SERVICE.get_report(&req, appraisal_id.0).await
}

pub async fn delete_appraisal(
    req: HttpRequest,
    appraisal_id: SafeAppraisalIdI64,
) -> ActixResult<HttpResponse> {
    APPRAISAL_SERVICE
        .delete_appraisal(&req, appraisal_id.0)
        .await
}

// 配置路由
pub fn configure_appraisals_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/appraisals")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/{appraisal_id}")
                    .route(web::get().to(get_appraisal))
                    .route(web::delete().to(delete_appraisal)),
            )
            .service(web::resource("/{appraisal_id}/report").route(web::get().to(get_report))),
    );
}
