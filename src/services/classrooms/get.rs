use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassroomService;
use crate::models::{ApiResponse, classrooms::entities::ClassroomDetail};
use crate::services::access::{current_user, internal_error, load_classroom};

pub async fn get_classroom(
    service: &ClassroomService,
    request: &HttpRequest,
    classroom_id: i64,
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

    match storage.count_classroom_students(classroom_id).await {
        Ok(student_count) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ClassroomDetail {
                classroom,
                student_count,
            },
            "Turma obtida com sucesso",
        ))),
        Err(e) => Ok(internal_error("Falha ao contar os alunos da turma", e)),
    }
}
