use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DossierService;
use crate::models::{
    ApiResponse,
    dossiers::requests::{DossierListParams, DossierListQuery},
    users::entities::UserRole,
};
use crate::services::access::{current_user, internal_error};

pub async fn list_dossiers(
    service: &DossierService,
    request: &HttpRequest,
    query: DossierListParams,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let mut list_query = DossierListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        search: query.search,
        ..Default::default()
    };

    match user.role {
        UserRole::Professor => list_query.professor_id = Some(user.id),
        UserRole::Institution => {
            list_query.institution_id = Some(user.id);
            list_query.professor_id = query.professor_id;
        }
    }

    match storage.list_dossiers_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Lista de dossiês obtida com sucesso",
        ))),
        Err(e) => Ok(internal_error("Falha ao listar dossiês", e)),
    }
}
