use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EvaluationMethodService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::internal_error;

pub async fn get_method(
    service: &EvaluationMethodService,
    request: &HttpRequest,
    method_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_evaluation_method(method_id).await {
        Ok(Some(method)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            method,
            "Método de avaliação obtido com sucesso",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::EvaluationMethodNotFound,
            "Método de avaliação não encontrado",
        ))),
        Err(e) => Ok(internal_error("Falha ao consultar o método de avaliação", e)),
    }
}
