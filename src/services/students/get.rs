use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::internal_error;

pub async fn get_student(
    service: &StudentService,
    request: &HttpRequest,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_student_by_id(student_id).await {
        Ok(Some(student)) => Ok(HttpResponse::Ok()
            .json(ApiResponse::success(student, "Aluno obtido com sucesso"))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StudentNotFound,
            "Aluno não encontrado",
        ))),
        Err(e) => Ok(internal_error("Falha ao consultar o aluno", e)),
    }
}

pub async fn get_student_by_registration(
    service: &StudentService,
    request: &HttpRequest,
    registration: String,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_student_by_registration(registration.trim()).await {
        Ok(Some(student)) => Ok(HttpResponse::Ok()
            .json(ApiResponse::success(student, "Aluno obtido com sucesso"))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StudentNotFound,
            "Aluno não encontrado",
        ))),
        Err(e) => Ok(internal_error("Falha ao consultar o aluno", e)),
    }
}
