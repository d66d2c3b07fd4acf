use std::collections::HashMap;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AppraisalService, classroom_dossier};
use crate::models::{
    ApiResponse,
    appraisals::responses::{ClassroomAppraisalRow, ClassroomAppraisalsResponse},
};
use crate::services::access::{current_user, internal_error, load_classroom};

// 名单中每个学生一行，未评估的学生评估字段为 null
pub async fn list_classroom_appraisals(
    service: &AppraisalService,
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

    let dossier_id = match classroom_dossier(&classroom) {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };

    let students = match storage.list_roster_students(classroom_id).await {
        Ok(students) => students,
        Err(e) => return Ok(internal_error("Falha ao listar os alunos da turma", e)),
    };

    let mut by_student: HashMap<i64, _> = match storage
        .list_classroom_appraisals(classroom_id, dossier_id)
        .await
    {
        Ok(appraisals) => appraisals
            .into_iter()
            .map(|appraisal| (appraisal.student_id, appraisal))
            .collect(),
        Err(e) => return Ok(internal_error("Falha ao listar as avaliações da turma", e)),
    };

    let items = students
        .into_iter()
        .map(|student| {
            let appraisal = by_student.remove(&student.id);
            ClassroomAppraisalRow {
                appraisal_id: appraisal.as_ref().map(|a| a.id),
                score: appraisal.as_ref().and_then(|a| a.score),
                completed: appraisal.as_ref().map(|a| a.completed),
                student,
            }
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        ClassroomAppraisalsResponse {
            classroom_id,
            dossier_id,
            items,
        },
        "Avaliações da turma obtidas com sucesso",
    )))
}
