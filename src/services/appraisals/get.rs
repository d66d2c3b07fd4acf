use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AppraisalService, classroom_dossier, load_appraisal};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{current_user, internal_error, load_classroom};

pub async fn get_student_appraisal(
    service: &AppraisalService,
    request: &HttpRequest,
    classroom_id: i64,
    student_id: i64,
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

    match storage
        .find_appraisal(student_id, classroom_id, dossier_id)
        .await
    {
        Ok(Some(detail)) => Ok(HttpResponse::Ok()
            .json(ApiResponse::success(detail, "Avaliação obtida com sucesso"))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AppraisalNotFound,
            "Avaliação não encontrada",
        ))),
        Err(e) => Ok(internal_error("Falha ao consultar a avaliação", e)),
    }
}

pub async fn get_appraisal(
    service: &AppraisalService,
    request: &HttpRequest,
    appraisal_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match load_appraisal(&storage, &user, appraisal_id).await {
        Ok((detail, _)) => Ok(HttpResponse::Ok()
            .json(ApiResponse::success(detail, "Avaliação obtida com sucesso"))),
        Err(resp) => Ok(resp),
    }
}
