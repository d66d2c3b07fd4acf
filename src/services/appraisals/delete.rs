use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{AppraisalService, load_appraisal};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{current_user, internal_error};

pub async fn delete_appraisal(
    service: &AppraisalService,
    request: &HttpRequest,
    appraisal_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    if let Err(resp) = load_appraisal(&storage, &user, appraisal_id).await {
        return Ok(resp);
    }

    match storage.delete_appraisal(appraisal_id).await {
        Ok(true) => {
            info!("Appraisal {} deleted by {}", appraisal_id, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Avaliação removida com sucesso")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AppraisalNotFound,
            "Avaliação não encontrada",
        ))),
        Err(e) => Ok(internal_error("Falha ao remover a avaliação", e)),
    }
}
