use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ProfessorService;
use crate::models::{
    ApiResponse,
    users::{
        entities::UserRole,
        requests::{ProfessorListParams, UserListQuery},
    },
};
use crate::services::access::{current_user, internal_error};

pub async fn list_professors(
    service: &ProfessorService,
    request: &HttpRequest,
    query: ProfessorListParams,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    // 只列出当前机构名下的教授
    let list_query = UserListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        role: Some(UserRole::Professor),
        status: query.status,
        institution_id: Some(user.id),
        search: query.search,
    };

    match storage.list_users_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Lista de professores obtida com sucesso",
        ))),
        Err(e) => Ok(internal_error("Falha ao listar professores", e)),
    }
}
