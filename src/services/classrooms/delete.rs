use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ClassroomService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{current_user, internal_error, load_classroom};

pub async fn delete_classroom(
    service: &ClassroomService,
    request: &HttpRequest,
    classroom_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    if let Err(resp) = load_classroom(&storage, &user, classroom_id).await {
        return Ok(resp);
    }

    match storage.delete_classroom(classroom_id).await {
        Ok(true) => {
            info!("Classroom {} deleted by {}", classroom_id, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Turma removida com sucesso")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ClassroomNotFound,
            "Turma não encontrada",
        ))),
        Err(e) => Ok(internal_error("Falha ao remover a turma", e)),
    }
}
