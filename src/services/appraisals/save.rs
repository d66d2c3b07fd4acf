use std::collections::{HashMap, HashSet};

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{AppraisalService, classroom_dossier, scoring::score_dossier};
use crate::models::{
    ApiResponse, ErrorCode,
    appraisals::requests::{AnswerInput, SaveAppraisal, SaveAppraisalRequest},
    dossiers::entities::DossierDetail,
};
use crate::services::access::{current_user, internal_error, load_classroom};

/// 校验作答：同一问题只能作答一次，问题必须属于档案，选项必须属于档案的评价方法
pub(crate) fn validate_answers(
    dossier: &DossierDetail,
    answers: &[AnswerInput],
) -> Result<(), String> {
    let mut seen = HashSet::with_capacity(answers.len());
    for answer in answers {
        if !seen.insert(answer.question_id) {
            return Err(format!(
                "Questão {} respondida mais de uma vez",
                answer.question_id
            ));
        }
        if !dossier.contains_question(answer.question_id) {
            return Err(format!(
                "Questão {} não pertence ao dossiê",
                answer.question_id
            ));
        }
        if dossier
            .evaluation_method
            .find_type(answer.evaluation_type_id)
            .is_none()
        {
            return Err(format!(
                "Opção {} não pertence ao método de avaliação do dossiê",
                answer.evaluation_type_id
            ));
        }
    }
    Ok(())
}

pub async fn save_appraisal(
    service: &AppraisalService,
    request: &HttpRequest,
    classroom_id: i64,
    student_id: i64,
    body: SaveAppraisalRequest,
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

    // 学生必须在班级名单中
    match storage.get_enrollment(classroom_id, student_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ClassroomStudentNotFound,
                "Aluno não matriculado nesta turma",
            )));
        }
        Err(e) => return Ok(internal_error("Falha ao consultar a matrícula", e)),
    }

    let dossier = match storage.get_dossier_detail(dossier_id).await {
        Ok(Some(dossier)) => dossier,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::DossierNotFound,
                "Dossiê não encontrado",
            )));
        }
        Err(e) => return Ok(internal_error("Falha ao consultar o dossiê", e)),
    };

    if let Err(msg) = validate_answers(&dossier, &body.answers) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::AppraisalAnswerInvalid,
            msg,
        )));
    }

    let answer_map: HashMap<i64, i64> = body
        .answers
        .iter()
        .map(|answer| (answer.question_id, answer.evaluation_type_id))
        .collect();
    let scorecard = score_dossier(&dossier, &answer_map);

    let appraisal = SaveAppraisal {
        student_id,
        classroom_id,
        dossier_id,
        professor_id: user.id,
        score: scorecard.total_score,
        completed: scorecard.is_complete(),
        answers: body.answers,
    };

    match storage.save_appraisal(appraisal).await {
        Ok(detail) => {
            info!(
                "Appraisal {} saved for student {} in classroom {} (score {})",
                detail.appraisal.id, student_id, classroom_id, scorecard.total_score
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(detail, "Avaliação salva com sucesso")))
        }
        Err(e) if e.is_validation() => Ok(HttpResponse::BadRequest().json(
            ApiResponse::error_empty(ErrorCode::AppraisalAnswerInvalid, "Respostas inválidas"),
        )),
        Err(e) => Ok(internal_error("Falha ao salvar a avaliação", e)),
    }
}
