use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{EvaluationMethodService, validation::normalize_types};
use crate::models::{
    ApiResponse, ErrorCode, evaluation_methods::requests::CreateEvaluationMethodRequest,
};
use crate::services::access::{current_user, internal_error};
use crate::utils::validate::non_blank;

pub async fn create_method(
    service: &EvaluationMethodService,
    request: &HttpRequest,
    mut method: CreateEvaluationMethodRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    match non_blank(&method.name) {
        Some(name) => method.name = name.to_string(),
        None => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::EvaluationMethodInvalid,
                "Nome do método de avaliação é obrigatório",
            )));
        }
    }

    method.types = match normalize_types(std::mem::take(&mut method.types)) {
        Ok(types) => types,
        Err(msg) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::EvaluationMethodInvalid,
                msg,
            )));
        }
    };

    let storage = service.get_storage(request);

    match storage.create_evaluation_method(user.id, method).await {
        Ok(method) => {
            info!(
                "Evaluation method {} created by {}",
                method.method.id, user.id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                method,
                "Método de avaliação criado com sucesso",
            )))
        }
        Err(e) if e.is_conflict() => Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::Conflict,
            "Método de avaliação já existe",
        ))),
        Err(e) => Ok(internal_error("Falha ao criar o método de avaliação", e)),
    }
}
