use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::dossiers::requests::{
    CreateDossierRequest, DossierListParams, UpdateDossierRequest,
};
use crate::services::DossierService;
use crate::utils::SafeDossierIdI64;

// 懒加载的全局 DossierService 实例
static DOSSIER_SERVICE: Lazy<DossierService> = Lazy::new(DossierService::new_lazy);

// HTTP处理程序
pub async fn list_dossiers(
    req: HttpRequest,
    query: web::Query<DossierListParams>,
) -> ActixResult<HttpResponse> {
    DOSSIER_SERVICE.list_dossiers(&req, query.into_inner()).await
}

pub async fn create_dossier(
    req: HttpRequest,
    dossier: web::Json<CreateDossierRequest>,
) -> ActixResult<HttpResponse> {
    DOSSIER_SERVICE
        .create_dossier(&req, dossier.into_inner())
        .await
}

pub async fn get_dossier(
    req: HttpRequest,
    dossier_id: SafeDossierIdI64,
) -> ActixResult<HttpResponse> {
    DOSSIER_SERVICE.get_dossier(&req, dossier_id.0).await
}

pub async fn update_dossier(
    req: HttpRequest,
    dossier_id: SafeDossierIdI64,
    update: web::Json<UpdateDossierRequest>,
) -> ActixResult<HttpResponse> {
    DOSSIER_SERVICE
        .update_dossier(&req, dossier_id.0, update.into_inner())
        .await
}

pub async fn delete_dossier(
    req: HttpRequest,
    dossier_id: SafeDossierIdI64,
) -> ActixResult<HttpResponse> {
    DOSSIER_SERVICE.delete_dossier(&req, dossier_id.0).await
}

// 配置路由
pub fn configure_dossiers_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/dossiers")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_dossiers))
                    .route(web::post().to(create_dossier)),
            )
            .service(
                web::resource("/{dossier_id}")
                    .route(web::get().to(get_dossier))
                    .route(web::put().to(update_dossier))
                    .route(web::delete().to(delete_dossier)),
            ),
    );
}
