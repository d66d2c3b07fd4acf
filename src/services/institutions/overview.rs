use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::InstitutionService;
use crate::models::ApiResponse;
use crate::services::access::{current_user, internal_error};

pub async fn get_overview(
    service: &InstitutionService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let institution = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage.get_institution_overview(institution.id).await {
        Ok(overview) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            overview,
            "Visão geral obtida com sucesso",
        ))),
        Err(e) => Ok(internal_error("Falha ao obter a visão geral", e)),
    }
}
