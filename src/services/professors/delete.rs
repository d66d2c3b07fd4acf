use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{ProfessorService, load_own_professor};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{current_user, internal_error};

// 删除教授时其班级、档案与评估随外键级联删除
pub async fn delete_professor(
    service: &ProfessorService,
    request: &HttpRequest,
    professor_id: i64,
) -> ActixResult<HttpResponse> {
    let institution = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    if let Err(resp) = load_own_professor(&storage, &institution, professor_id).await {
        return Ok(resp);
    }

    match storage.delete_user(professor_id).await {
        Ok(true) => {
            info!(
                "Professor {} deleted by institution {}",
                professor_id, institution.id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Professor removido com sucesso")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "Professor não encontrado",
        ))),
        Err(e) => Ok(internal_error("Falha ao remover o professor", e)),
    }
}
