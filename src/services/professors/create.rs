use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::ProfessorService;
use crate::models::{
    ApiResponse, ErrorCode,
    notifications::requests::CreateNotificationRequest,
    users::{
        entities::UserRole,
        requests::{CreateProfessorRequest, CreateUserRequest},
        responses::UserResponse,
    },
};
use crate::services::access::{current_user, internal_error};
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password_simple, validate_username};

pub async fn create_professor(
    service: &ProfessorService,
    request: &HttpRequest,
    professor: CreateProfessorRequest,
) -> ActixResult<HttpResponse> {
    let institution = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    // 验证用户名
    if let Err(msg) = validate_username(&professor.username) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserNameInvalid, msg)));
    }

    // 验证邮箱
    if let Err(msg) = validate_email(&professor.email) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserEmailInvalid, msg)));
    }

    // 验证密码策略
    if let Err(msg) = validate_password_simple(&professor.password) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserPasswordInvalid, msg)));
    }

    let password_hash = match hash_password(&professor.password) {
        Ok(hash) => hash,
        Err(e) => return Ok(internal_error("Falha ao gerar o hash da senha", e)),
    };

    let storage = service.get_storage(request);

    let new_user = CreateUserRequest {
        username: professor.username,
        email: professor.email,
        password: password_hash,
        role: UserRole::Professor,
        display_name: professor.display_name,
        institution_id: Some(institution.id),
        email_verified: false,
    };

    let user = match storage.create_user(new_user).await {
        Ok(user) => user,
        Err(e) if e.is_conflict() => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::UserAlreadyExists,
                "Nome de usuário ou e-mail já cadastrado",
            )));
        }
        Err(e) => return Ok(internal_error("Falha ao criar o professor", e)),
    };

    info!(
        "Professor {} created by institution {}",
        user.username, institution.id
    );

    // 欢迎通知失败不影响创建结果
    let welcome = CreateNotificationRequest {
        user_id: user.id,
        title: "Bem-vindo".to_string(),
        content: format!(
            "Sua conta de professor foi criada por {}.",
            institution
                .display_name
                .as_deref()
                .unwrap_or(&institution.username)
        ),
        reference_type: Some("user".to_string()),
        reference_id: Some(user.id),
    };
    if let Err(e) = storage.create_notification(welcome).await {
        warn!("Failed to send welcome notification to {}: {}", user.id, e);
    }

    Ok(HttpResponse::Created().json(ApiResponse::success(
        UserResponse { user },
        "Professor criado com sucesso",
    )))
}
