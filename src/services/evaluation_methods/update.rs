use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{
    EvaluationMethodService, ensure_not_in_use, load_editable_method, validation::normalize_types,
};
use crate::models::{
    ApiResponse, ErrorCode, evaluation_methods::requests::UpdateEvaluationMethodRequest,
};
use crate::services::access::{current_user, internal_error};
use crate::utils::validate::non_blank;

pub async fn update_method(
    service: &EvaluationMethodService,
    request: &HttpRequest,
    method_id: i64,
    mut update: UpdateEvaluationMethodRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    if let Err(resp) = load_editable_method(&storage, &user, method_id).await {
        return Ok(resp);
    }

    if let Some(name) = update.name.take() {
        match non_blank(&name) {
            Some(name) => update.name = Some(name.to_string()),
            None => {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::EvaluationMethodInvalid,
                    "Nome do método de avaliação não pode ser vazio",
                )));
            }
        }
    }

    if let Some(types) = update.types.take() {
        let types = match normalize_types(types) {
            Ok(types) => types,
            Err(msg) => {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::EvaluationMethodInvalid,
                    msg,
                )));
            }
        };
        // 已记录的作答引用旧选项，被使用时不允许替换
        if let Err(resp) = ensure_not_in_use(
            &storage,
            method_id,
            "As opções não podem ser alteradas enquanto o método estiver em uso",
        )
        .await
        {
            return Ok(resp);
        }
        update.types = Some(types);
    }

    match storage.update_evaluation_method(method_id, update).await {
        Ok(Some(method)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            method,
            "Método de avaliação atualizado com sucesso",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::EvaluationMethodNotFound,
            "Método de avaliação não encontrado",
        ))),
        Err(e) => Ok(internal_error("Falha ao atualizar o método de avaliação", e)),
    }
}
