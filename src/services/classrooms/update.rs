use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassroomService;
use crate::models::{ApiResponse, ErrorCode, classrooms::requests::UpdateClassroomRequest};
use crate::services::access::{
    check_classroom_dossier, current_user, internal_error, load_classroom,
};
use crate::utils::validate::non_blank;

pub async fn update_classroom(
    service: &ClassroomService,
    request: &HttpRequest,
    classroom_id: i64,
    mut update: UpdateClassroomRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let classroom = match load_classroom(&storage, &user, classroom_id).await {
        Ok(classroom) => classroom,
        Err(resp) => return Ok(resp),
    };

    if let Some(name) = update.name.take() {
        match non_blank(&name) {
            Some(name) => update.name = Some(name.to_string()),
            None => {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::ClassroomDataInvalid,
                    "Nome da turma não pode ser vazio",
                )));
            }
        }
    }

    // 关联档案必须属于班级的教授；显式 null 解除关联
    if let Some(Some(dossier_id)) = update.dossier_id
        && let Err(resp) =
            check_classroom_dossier(&storage, classroom.professor_id, dossier_id).await
    {
        return Ok(resp);
    }

    match storage.update_classroom(classroom_id, update).await {
        Ok(Some(classroom)) => Ok(HttpResponse::Ok()
            .json(ApiResponse::success(classroom, "Turma atualizada com sucesso"))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ClassroomNotFound,
            "Turma não encontrada",
        ))),
        Err(e) => Ok(internal_error("Falha ao atualizar a turma", e)),
    }
}
