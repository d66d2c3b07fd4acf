use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::users::entities::UserRole;
use crate::models::users::requests::{
    CreateProfessorRequest, ProfessorListParams, UpdateUserRequest,
};
use crate::services::ProfessorService;
use crate::utils::SafeProfessorIdI64;

// 懒加载的全局 ProfessorService 实例
static PROFESSOR_SERVICE: Lazy<ProfessorService> = Lazy::new(ProfessorService::new_lazy);

// HTTP处理程序
pub async fn list_professors(
    req: HttpRequest,
    query: web::Query<ProfessorListParams>,
) -> ActixResult<HttpResponse> {
    PROFESSOR_SERVICE
        .list_professors(&req, query.into_inner())
        .await
}

pub async fn create_professor(
    req: HttpRequest,
    professor: web::Json<CreateProfessorRequest>,
) -> ActixResult<HttpResponse> {
    PROFESSOR_SERVICE
        .create_professor(&req, professor.into_inner())
        .await
}

pub async fn get_professor(
    req: HttpRequest,
    professor_id: SafeProfessorIdI64,
) -> ActixResult<HttpResponse> {
    PROFESSOR_SERVICE.get_professor(&req, professor_id.0).await
}

pub async fn update_professor(
    req: HttpRequest,
    professor_id: SafeProfessorIdI64,
    update: web::Json<UpdateUserRequest>,
) -> ActixResult<HttpResponse> {
    PROFESSOR_SERVICE
        .update_professor(&req, professor_id.0, update.into_inner())
        .await
}

pub async fn delete_professor(
    req: HttpRequest,
    professor_id: SafeProfessorIdI64,
) -> ActixResult<HttpResponse> {
    PROFESSOR_SERVICE
        .delete_professor(&req, professor_id.0)
        .await
}

// 配置路由：仅机构可管理其名下教授
pub fn configure_professors_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/professors")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new(&UserRole::Institution))
                    .route("", web::get().to(list_professors))
                    .route("", web::post().to(create_professor))
                    .route("/{professor_id}", web::get().to(get_professor))
                    .route("/{professor_id}", web::put().to(update_professor))
                    .route("/{professor_id}", web::delete().to(delete_professor)),
            ),
    );
}
