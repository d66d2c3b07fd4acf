//! 班级名单：列出、加入、移出学生

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ClassroomService;
use crate::models::{
    ApiResponse, ErrorCode,
    classrooms::{entities::RosterEntry, requests::EnrollStudentRequest},
    common::PaginationQuery,
    students::{entities::Student, requests::CreateStudentRequest},
};
use crate::services::access::{current_user, internal_error, load_classroom};
use crate::services::students::create::normalize_new_student;
use crate::storage::Storage;
use crate::utils::validate::non_blank;

pub async fn list_roster(
    service: &ClassroomService,
    request: &HttpRequest,
    classroom_id: i64,
    query: PaginationQuery,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    if let Err(resp) = load_classroom(&storage, &user, classroom_id).await {
        return Ok(resp);
    }

    match storage
        .list_roster_with_pagination(classroom_id, Some(query.page), Some(query.size))
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Lista de alunos da turma obtida com sucesso",
        ))),
        Err(e) => Ok(internal_error("Falha ao listar os alunos da turma", e)),
    }
}

/// 按请求确定要加入的学生：指定 ID，或按学号关联已有学生，找不到时新建
async fn resolve_student(
    storage: &Arc<dyn Storage>,
    enroll: EnrollStudentRequest,
) -> Result<Student, HttpResponse> {
    if let Some(student_id) = enroll.student_id {
        return match storage.get_student_by_id(student_id).await {
            Ok(Some(student)) => Ok(student),
            Ok(None) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::StudentNotFound,
                "Aluno não encontrado",
            ))),
            Err(e) => Err(internal_error("Falha ao consultar o aluno", e)),
        };
    }

    let Some(registration) = enroll.registration.as_deref().and_then(non_blank) else {
        return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::StudentDataInvalid,
            "Informe student_id ou a matrícula do aluno",
        )));
    };

    match storage.get_student_by_registration(registration).await {
        Ok(Some(student)) => return Ok(student),
        Ok(None) => {}
        Err(e) => return Err(internal_error("Falha ao consultar o aluno", e)),
    }

    let new_student = CreateStudentRequest {
        registration: registration.to_string(),
        name: enroll.name.unwrap_or_default(),
        email: enroll.email,
    };
    let new_student = normalize_new_student(new_student).map_err(|msg| {
        HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::StudentDataInvalid, msg))
    })?;

    match storage.create_student(new_student).await {
        Ok(student) => {
            info!("Student {} created during enrolment", student.registration);
            Ok(student)
        }
        Err(e) if e.is_conflict() => Err(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::StudentAlreadyExists,
            "Matrícula já cadastrada",
        ))),
        Err(e) => Err(internal_error("Falha ao criar o aluno", e)),
    }
}

pub async fn enroll_student(
    service: &ClassroomService,
    request: &HttpRequest,
    classroom_id: i64,
    enroll: EnrollStudentRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    if let Err(resp) = load_classroom(&storage, &user, classroom_id).await {
        return Ok(resp);
    }

    let student = match resolve_student(&storage, enroll).await {
        Ok(student) => student,
        Err(resp) => return Ok(resp),
    };

    match storage.get_enrollment(classroom_id, student.id).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::ClassroomStudentAlreadyExists,
                "Aluno já matriculado nesta turma",
            )));
        }
        Ok(None) => {}
        Err(e) => return Ok(internal_error("Falha ao consultar a matrícula", e)),
    }

    match storage.enroll_student(classroom_id, student.id).await {
        Ok(enrollment) => {
            info!(
                "Student {} enrolled in classroom {}",
                student.id, classroom_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                RosterEntry {
                    enrollment_id: enrollment.id,
                    joined_at: enrollment.joined_at,
                    student,
                },
                "Aluno adicionado à turma",
            )))
        }
        Err(e) if e.is_conflict() => Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::ClassroomStudentAlreadyExists,
            "Aluno já matriculado nesta turma",
        ))),
        Err(e) => Ok(internal_error("Falha ao matricular o aluno", e)),
    }
}

// 移出学生会同时删除其在该班级的评估
pub async fn remove_student(
    service: &ClassroomService,
    request: &HttpRequest,
    classroom_id: i64,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    if let Err(resp) = load_classroom(&storage, &user, classroom_id).await {
        return Ok(resp);
    }

    match storage
        .remove_student_from_classroom(classroom_id, student_id)
        .await
    {
        Ok(true) => {
            info!(
                "Student {} removed from classroom {}",
                student_id, classroom_id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Aluno removido da turma")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ClassroomStudentNotFound,
            "Aluno não matriculado nesta turma",
        ))),
        Err(e) => Ok(internal_error("Falha ao remover o aluno da turma", e)),
    }
}
