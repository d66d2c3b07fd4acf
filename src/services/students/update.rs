use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::models::{ApiResponse, ErrorCode, students::requests::UpdateStudentRequest};
use crate::services::access::internal_error;
use crate::utils::validate::{non_blank, validate_email};

pub async fn update_student(
    service: &StudentService,
    request: &HttpRequest,
    student_id: i64,
    mut update: UpdateStudentRequest,
) -> ActixResult<HttpResponse> {
    if let Some(registration) = update.registration.take() {
        match non_blank(&registration) {
            Some(value) => update.registration = Some(value.to_string()),
            None => {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::StudentDataInvalid,
                    "Matrícula não pode ser vazia",
                )));
            }
        }
    }

    if let Some(name) = update.name.take() {
        match non_blank(&name) {
            Some(value) => update.name = Some(value.to_string()),
            None => {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::StudentDataInvalid,
                    "Nome do aluno não pode ser vazio",
                )));
            }
        }
    }

    // 空字符串表示清除邮箱
    if let Some(email) = update.email.take() {
        let email = email.trim().to_string();
        if !email.is_empty()
            && let Err(msg) = validate_email(&email)
        {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::StudentDataInvalid, msg)));
        }
        update.email = Some(email);
    }

    let storage = service.get_storage(request);

    match storage.update_student(student_id, update).await {
        Ok(Some(student)) => Ok(HttpResponse::Ok()
            .json(ApiResponse::success(student, "Aluno atualizado com sucesso"))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StudentNotFound,
            "Aluno não encontrado",
        ))),
        Err(e) if e.is_conflict() => Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::StudentAlreadyExists,
            "Matrícula já cadastrada",
        ))),
        Err(e) => Ok(internal_error("Falha ao atualizar o aluno", e)),
    }
}
