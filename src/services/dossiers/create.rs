use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{
    DossierService, ensure_method_exists,
    validation::{normalize_name, normalize_sections},
};
use crate::models::{
    ApiResponse, ErrorCode,
    dossiers::requests::{CreateDossierRequest, NewDossier},
};
use crate::services::access::{current_user, internal_error, resolve_professor};

pub async fn create_dossier(
    service: &DossierService,
    request: &HttpRequest,
    dossier: CreateDossierRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    let (name, sections) = match normalize_name(&dossier.name)
        .and_then(|name| normalize_sections(dossier.sections).map(|sections| (name, sections)))
    {
        Ok(valid) => valid,
        Err(msg) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::DossierInvalid, msg)));
        }
    };

    let storage = service.get_storage(request);

    let professor_id = match resolve_professor(
        &storage,
        &user,
        dossier.professor_id,
        ErrorCode::DossierPermissionDenied,
    )
    .await
    {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };

    if let Err(resp) = ensure_method_exists(&storage, dossier.evaluation_method_id).await {
        return Ok(resp);
    }

    let new_dossier = NewDossier {
        professor_id,
        name,
        description: dossier.description,
        evaluation_method_id: dossier.evaluation_method_id,
        sections,
    };

    match storage.create_dossier(new_dossier).await {
        Ok(detail) => {
            info!(
                "Dossier {} created for professor {} with {} sections",
                detail.dossier.id,
                professor_id,
                detail.sections.len()
            );
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(detail, "Dossiê criado com sucesso")))
        }
        Err(e) if e.is_validation() => Ok(HttpResponse::BadRequest().json(
            ApiResponse::error_empty(ErrorCode::DossierInvalid, "Dados do dossiê inválidos"),
        )),
        Err(e) => Ok(internal_error("Falha ao criar o dossiê", e)),
    }
}
