use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{
    DossierService, ensure_method_exists,
    validation::{normalize_name, normalize_sections},
};
use crate::models::{ApiResponse, ErrorCode, dossiers::requests::UpdateDossierRequest};
use crate::services::access::{current_user, internal_error, load_dossier};

pub async fn update_dossier(
    service: &DossierService,
    request: &HttpRequest,
    dossier_id: i64,
    mut update: UpdateDossierRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    if let Err(resp) = load_dossier(&storage, &user, dossier_id).await {
        return Ok(resp);
    }

    if let Some(name) = update.name.take() {
        match normalize_name(&name) {
            Ok(name) => update.name = Some(name),
            Err(msg) => {
                return Ok(HttpResponse::BadRequest()
                    .json(ApiResponse::error_empty(ErrorCode::DossierInvalid, msg)));
            }
        }
    }

    if let Some(sections) = update.sections.take() {
        match normalize_sections(sections) {
            Ok(sections) => update.sections = Some(sections),
            Err(msg) => {
                return Ok(HttpResponse::BadRequest()
                    .json(ApiResponse::error_empty(ErrorCode::DossierInvalid, msg)));
            }
        }
    }

    if let Some(method_id) = update.evaluation_method_id
        && let Err(resp) = ensure_method_exists(&storage, method_id).await
    {
        return Ok(resp);
    }

    let replaces_sections = update.sections.is_some();

    match storage.update_dossier(dossier_id, update).await {
        Ok(Some(detail)) => {
            if replaces_sections {
                info!(
                    "Dossier {} sections replaced by {}, appraisals reset",
                    dossier_id, user.id
                );
            }
            Ok(HttpResponse::Ok()
                .json(ApiResponse::success(detail, "Dossiê atualizado com sucesso")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::DossierNotFound,
            "Dossiê não encontrado",
        ))),
        Err(e) if e.is_validation() => Ok(HttpResponse::BadRequest().json(
            ApiResponse::error_empty(ErrorCode::DossierInvalid, "Dados do dossiê inválidos"),
        )),
        Err(e) => Ok(internal_error("Falha ao atualizar o dossiê", e)),
    }
}
