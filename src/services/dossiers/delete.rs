use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::DossierService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{current_user, internal_error, load_dossier};

pub async fn delete_dossier(
    service: &DossierService,
    request: &HttpRequest,
    dossier_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    if let Err(resp) = load_dossier(&storage, &user, dossier_id).await {
        return Ok(resp);
    }

    match storage.delete_dossier(dossier_id).await {
        Ok(true) => {
            info!("Dossier {} deleted by {}", dossier_id, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Dossiê removido com sucesso")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::DossierNotFound,
            "Dossiê não encontrado",
        ))),
        Err(e) => Ok(internal_error("Falha ao remover o dossiê", e)),
    }
}
