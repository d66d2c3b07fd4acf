use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ProfessorService, load_own_professor};
use crate::models::{
    ApiResponse, ErrorCode,
    users::{requests::UpdateUserRequest, responses::UserResponse},
};
use crate::services::access::{current_user, internal_error};
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password_simple};

pub async fn update_professor(
    service: &ProfessorService,
    request: &HttpRequest,
    professor_id: i64,
    mut update: UpdateUserRequest,
) -> ActixResult<HttpResponse> {
    let institution = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    if let Err(resp) = load_own_professor(&storage, &institution, professor_id).await {
        return Ok(resp);
    }

    if let Some(ref email) = update.email
        && let Err(msg) = validate_email(email)
    {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserEmailInvalid, msg)));
    }

    if let Some(password) = update.password.take() {
        if let Err(msg) = validate_password_simple(&password) {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::UserPasswordInvalid, msg)));
        }
        match hash_password(&password) {
            Ok(hash) => update.password = Some(hash),
            Err(e) => return Ok(internal_error("Falha ao gerar o hash da senha", e)),
        }
    }

    match storage.update_user(professor_id, update).await {
        Ok(Some(user)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UserResponse { user },
            "Professor atualizado com sucesso",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "Professor não encontrado",
        ))),
        Err(e) if e.is_conflict() => Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::UserAlreadyExists,
            "E-mail já cadastrado",
        ))),
        Err(e) => Ok(internal_error("Falha ao atualizar o professor", e)),
    }
}
