use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::StudentService;
use crate::models::{ApiResponse, ErrorCode, students::requests::CreateStudentRequest};
use crate::services::access::internal_error;
use crate::utils::validate::{non_blank, validate_email};

/// 规范化新学生数据：学号与姓名去除首尾空白且不能为空，空邮箱视为未填写
pub(crate) fn normalize_new_student(
    student: CreateStudentRequest,
) -> Result<CreateStudentRequest, &'static str> {
    let registration = non_blank(&student.registration)
        .ok_or("Matrícula é obrigatória")?
        .to_string();
    let name = non_blank(&student.name)
        .ok_or("Nome do aluno é obrigatório")?
        .to_string();
    let email = match student.email.as_deref().and_then(non_blank) {
        Some(email) => {
            validate_email(email)?;
            Some(email.to_string())
        }
        None => None,
    };

    Ok(CreateStudentRequest {
        registration,
        name,
        email,
    })
}

pub async fn create_student(
    service: &StudentService,
    request: &HttpRequest,
    student: CreateStudentRequest,
) -> ActixResult<HttpResponse> {
    let student = match normalize_new_student(student) {
        Ok(student) => student,
        Err(msg) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::StudentDataInvalid, msg)));
        }
    };

    let storage = service.get_storage(request);

    match storage.create_student(student).await {
        Ok(student) => {
            info!("Student {} created", student.registration);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(student, "Aluno criado com sucesso")))
        }
        Err(e) if e.is_conflict() => Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::StudentAlreadyExists,
            "Matrícula já cadastrada",
        ))),
        Err(e) => Ok(internal_error("Falha ao criar o aluno", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(registration: &str, name: &str, email: Option<&str>) -> CreateStudentRequest {
        CreateStudentRequest {
            registration: registration.to_string(),
            name: name.to_string(),
            email: email.map(str::to_string),
        }
    }

    #[test]
    fn test_trims_fields_and_drops_blank_email() {
        let student = normalize_new_student(input(" 2024001 ", " Ana ", Some("  "))).unwrap();
        assert_eq!(student.registration, "2024001");
        assert_eq!(student.name, "Ana");
        assert_eq!(student.email, None);
    }

    #[test]
    fn test_rejects_blank_registration_and_name() {
        assert!(normalize_new_student(input("  ", "Ana", None)).is_err());
        assert!(normalize_new_student(input("2024001", "", None)).is_err());
    }

    #[test]
    fn test_rejects_malformed_email() {
        assert!(normalize_new_student(input("2024001", "Ana", Some("ana@"))).is_err());
    }
}
