use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::evaluation_methods::requests::{
    CreateEvaluationMethodRequest, UpdateEvaluationMethodRequest,
};
use crate::services::EvaluationMethodService;
use crate::utils::SafeEvaluationMethodIdI64;

// 懒加载的全局 EvaluationMethodService 实例
static EVALUATION_METHOD_SERVICE: Lazy<EvaluationMethodService> =
    Lazy::new(EvaluationMethodService::new_lazy);

// HTTP处理程序
pub async fn list_methods(req: HttpRequest) -> ActixResult<HttpResponse> {
    EVALUATION_METHOD_SERVICE.list_methods(&req).await
}

pub async fn create_method(
    req: HttpRequest,
    method: web::Json<CreateEvaluationMethodRequest>,
) -> ActixResult<HttpResponse> {
    EVALUATION_METHOD_SERVICE
        .create_method(&req, method.into_inner())
        .await
}

pub async fn get_method(
    req: HttpRequest,
    method_id: SafeEvaluationMethodIdI64,
) -> ActixResult<HttpResponse> {
    EVALUATION_METHOD_SERVICE.get_method(&req, method_id.0).await
}

pub async fn update_method(
    req: HttpRequest,
    method_id: SafeEvaluationMethodIdI64,
    update: web::Json<UpdateEvaluationMethodRequest>,
) -> ActixResult<HttpResponse> {
    EVALUATION_METHOD_SERVICE
        .update_method(&req, method_id.0, update.into_inner())
        .await
}

pub async fn delete_method(
    req: HttpRequest,
    method_id: SafeEvaluationMethodIdI64,
) -> ActixResult<HttpResponse> {
    EVALUATION_METHOD_SERVICE
        .delete_method(&req, method_id.0)
        .await
}

// 配置路由
pub fn configure_evaluation_methods_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/evaluation-methods")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_methods))
                    .route(web::post().to(create_method)),
            )
            .service(
                web::resource("/{method_id}")
                    .route(web::get().to(get_method))
                    .route(web::put().to(update_method))
                    .route(web::delete().to(delete_method)),
            ),
    );
}
