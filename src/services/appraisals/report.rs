//! 评估报告数据（按当前档案与作答重新计算）

use std::collections::HashMap;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AppraisalService, load_appraisal, scoring::score_dossier};
use crate::models::{ApiResponse, ErrorCode, appraisals::responses::AppraisalReport};
use crate::services::access::{current_user, internal_error};

pub async fn get_report(
    service: &AppraisalService,
    request: &HttpRequest,
    appraisal_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let (detail, classroom) = match load_appraisal(&storage, &user, appraisal_id).await {
        Ok(loaded) => loaded,
        Err(resp) => return Ok(resp),
    };

    let student = match storage.get_student_by_id(detail.appraisal.student_id).await {
        Ok(Some(student)) => student,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::StudentNotFound,
                "Aluno não encontrado",
            )));
        }
        Err(e) => return Ok(internal_error("Falha ao consultar o aluno", e)),
    };

    let dossier = match storage.get_dossier_detail(detail.appraisal.dossier_id).await {
        Ok(Some(dossier)) => dossier,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::DossierNotFound,
                "Dossiê não encontrado",
            )));
        }
        Err(e) => return Ok(internal_error("Falha ao consultar o dossiê", e)),
    };

    let answers: HashMap<i64, i64> = detail
        .answers
        .iter()
        .map(|answer| (answer.question_id, answer.evaluation_type_id))
        .collect();
    let scorecard = score_dossier(&dossier, &answers);

    let report = AppraisalReport {
        appraisal: detail.appraisal,
        student,
        classroom,
        dossier: dossier.dossier,
        evaluation_method: dossier.evaluation_method,
        sections: scorecard.sections,
        total_score: scorecard.total_score,
        generated_at: chrono::Utc::now(),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        report,
        "Relatório gerado com sucesso",
    )))
}
