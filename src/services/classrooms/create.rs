use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ClassroomService;
use crate::models::{ApiResponse, ErrorCode, classrooms::requests::CreateClassroomRequest};
use crate::services::access::{
    check_classroom_dossier, current_user, internal_error, resolve_professor,
};
use crate::utils::validate::non_blank;

pub async fn create_classroom(
    service: &ClassroomService,
    request: &HttpRequest,
    mut classroom: CreateClassroomRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    match non_blank(&classroom.name) {
        Some(name) => classroom.name = name.to_string(),
        None => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ClassroomDataInvalid,
                "Nome da turma é obrigatório",
            )));
        }
    }

    let storage = service.get_storage(request);

    // 权限校验
    let professor_id = match resolve_professor(
        &storage,
        &user,
        classroom.professor_id,
        ErrorCode::ClassroomPermissionDenied,
    )
    .await
    {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };

    if let Some(dossier_id) = classroom.dossier_id
        && let Err(resp) = check_classroom_dossier(&storage, professor_id, dossier_id).await
    {
        return Ok(resp);
    }

    match storage.create_classroom(professor_id, classroom).await {
        Ok(classroom) => {
            info!(
                "Classroom {} created for professor {} by {}",
                classroom.id, professor_id, user.id
            );
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(classroom, "Turma criada com sucesso")))
        }
        Err(e) if e.is_validation() => Ok(HttpResponse::BadRequest().json(
            ApiResponse::error_empty(ErrorCode::ClassroomDataInvalid, "Dados da turma inválidos"),
        )),
        Err(e) => Ok(internal_error("Falha ao criar a turma", e)),
    }
}
