use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ProfessorService, load_own_professor};
use crate::models::{ApiResponse, users::responses::UserResponse};
use crate::services::access::current_user;

pub async fn get_professor(
    service: &ProfessorService,
    request: &HttpRequest,
    professor_id: i64,
) -> ActixResult<HttpResponse> {
    let institution = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match load_own_professor(&storage, &institution, professor_id).await {
        Ok(user) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UserResponse { user },
            "Professor obtido com sucesso",
        ))),
        Err(resp) => Ok(resp),
    }
}
