use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{EvaluationMethodService, ensure_not_in_use, load_editable_method};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{current_user, internal_error};

pub async fn delete_method(
    service: &EvaluationMethodService,
    request: &HttpRequest,
    method_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    if let Err(resp) = load_editable_method(&storage, &user, method_id).await {
        return Ok(resp);
    }

    if let Err(resp) = ensure_not_in_use(
        &storage,
        method_id,
        "O método de avaliação está em uso por um ou mais dossiês",
    )
    .await
    {
        return Ok(resp);
    }

    match storage.delete_evaluation_method(method_id).await {
        Ok(true) => {
            info!("Evaluation method {} deleted by {}", method_id, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Método de avaliação removido com sucesso",
            )))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::EvaluationMethodNotFound,
            "Método de avaliação não encontrado",
        ))),
        // 检查之后又被档案引用时，外键约束拒绝删除
        Err(e) if e.is_validation() => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(
                ErrorCode::EvaluationMethodInUse,
                "O método de avaliação está em uso por um ou mais dossiês",
            ),
        )),
        Err(e) => Ok(internal_error("Falha ao remover o método de avaliação", e)),
    }
}
