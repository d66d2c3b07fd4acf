use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EvaluationMethodService;
use crate::models::{ApiResponse, evaluation_methods::responses::EvaluationMethodListResponse};
use crate::services::access::internal_error;

pub async fn list_methods(
    service: &EvaluationMethodService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_evaluation_methods().await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            EvaluationMethodListResponse { items },
            "Métodos de avaliação obtidos com sucesso",
        ))),
        Err(e) => Ok(internal_error("Falha ao listar métodos de avaliação", e)),
    }
}
