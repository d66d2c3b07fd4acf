//! 服务层共用的身份与归属校验
//!
//! 归属规则：教授可以操作自己拥有的资源；机构可以操作其名下教授拥有的资源；
//! 其余情况一律 403。校验失败时直接返回可用于响应的 `HttpResponse`。

use std::sync::Arc;

use actix_web::HttpResponse;
use tracing::error;

use crate::middlewares::RequireJWT;
use crate::models::classrooms::entities::Classroom;
use crate::models::dossiers::entities::Dossier;
use crate::models::users::entities::{User, UserRole};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub(crate) fn current_user(request: &actix_web::HttpRequest) -> Result<User, HttpResponse> {
    RequireJWT::extract_user_claims(request).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Não autorizado: conta não identificada",
        ))
    })
}

pub(crate) fn internal_error(context: &str, err: impl std::fmt::Display) -> HttpResponse {
    error!("{}: {}", context, err);
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
        ErrorCode::InternalServerError,
        format!("{context}: {err}"),
    ))
}

pub(crate) fn forbidden(code: ErrorCode, message: &str) -> HttpResponse {
    HttpResponse::Forbidden().json(ApiResponse::error_empty(code, message))
}

pub(crate) fn not_found(code: ErrorCode, message: &str) -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(code, message))
}

pub(crate) fn bad_request(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(code, message))
}

/// 当前账号能否管理 owner_id 拥有的资源
pub(crate) async fn can_manage_owner(
    storage: &Arc<dyn Storage>,
    user: &User,
    owner_id: i64,
) -> Result<bool, HttpResponse> {
    if user.id == owner_id {
        return Ok(true);
    }
    if user.role != UserRole::Institution {
        return Ok(false);
    }

    match storage.get_user_by_id(owner_id).await {
        Ok(Some(owner)) => Ok(user.can_manage(&owner)),
        Ok(None) => Ok(false),
        Err(e) => Err(internal_error("Falha ao consultar o responsável", e)),
    }
}

pub(crate) async fn ensure_can_manage(
    storage: &Arc<dyn Storage>,
    user: &User,
    owner_id: i64,
    code: ErrorCode,
) -> Result<(), HttpResponse> {
    if can_manage_owner(storage, user, owner_id).await? {
        Ok(())
    } else {
        Err(forbidden(code, "Sem permissão para acessar este recurso"))
    }
}

/// 确定新建资源的所属教授
///
/// 教授只能为自己创建；机构必须指定其名下的教授
pub(crate) async fn resolve_professor(
    storage: &Arc<dyn Storage>,
    user: &User,
    requested: Option<i64>,
    code: ErrorCode,
) -> Result<i64, HttpResponse> {
    match user.role {
        UserRole::Professor => match requested {
            None => Ok(user.id),
            Some(id) if id == user.id => Ok(id),
            Some(_) => Err(forbidden(
                code,
                "Professores só podem criar recursos para si mesmos",
            )),
        },
        UserRole::Institution => {
            let Some(professor_id) = requested else {
                return Err(bad_request(
                    ErrorCode::BadRequest,
                    "professor_id é obrigatório para instituições",
                ));
            };
            match storage.get_user_by_id(professor_id).await {
                Ok(Some(professor))
                    if professor.role == UserRole::Professor
                        && professor.institution_id == Some(user.id) =>
                {
                    Ok(professor.id)
                }
                Ok(_) => Err(not_found(
                    ErrorCode::UserNotFound,
                    "Professor não encontrado",
                )),
                Err(e) => Err(internal_error("Falha ao consultar o professor", e)),
            }
        }
    }
}

/// 加载班级并校验归属：不存在 404，无权限 403
pub(crate) async fn load_classroom(
    storage: &Arc<dyn Storage>,
    user: &User,
    classroom_id: i64,
) -> Result<Classroom, HttpResponse> {
    let classroom = match storage.get_classroom_by_id(classroom_id).await {
        Ok(Some(classroom)) => classroom,
        Ok(None) => {
            return Err(not_found(
                ErrorCode::ClassroomNotFound,
                "Turma não encontrada",
            ));
        }
        Err(e) => return Err(internal_error("Falha ao consultar a turma", e)),
    };

    ensure_can_manage(
        storage,
        user,
        classroom.professor_id,
        ErrorCode::ClassroomPermissionDenied,
    )
    .await?;

    Ok(classroom)
}

/// 加载档案头并校验归属：不存在 404，无权限 403
pub(crate) async fn load_dossier(
    storage: &Arc<dyn Storage>,
    user: &User,
    dossier_id: i64,
) -> Result<Dossier, HttpResponse> {
    let dossier = match storage.get_dossier_by_id(dossier_id).await {
        Ok(Some(dossier)) => dossier,
        Ok(None) => {
            return Err(not_found(
                ErrorCode::DossierNotFound,
                "Dossiê não encontrado",
            ));
        }
        Err(e) => return Err(internal_error("Falha ao consultar o dossiê", e)),
    };

    ensure_can_manage(
        storage,
        user,
        dossier.professor_id,
        ErrorCode::DossierPermissionDenied,
    )
    .await?;

    Ok(dossier)
}

/// 班级关联档案时的校验：档案必须存在，且与班级属于同一位教授
pub(crate) async fn check_classroom_dossier(
    storage: &Arc<dyn Storage>,
    professor_id: i64,
    dossier_id: i64,
) -> Result<(), HttpResponse> {
    match storage.get_dossier_by_id(dossier_id).await {
        Ok(Some(dossier)) if dossier.professor_id == professor_id => Ok(()),
        Ok(Some(_)) => Err(forbidden(
            ErrorCode::DossierPermissionDenied,
            "O dossiê pertence a outro professor",
        )),
        Ok(None) => Err(not_found(
            ErrorCode::DossierNotFound,
            "Dossiê não encontrado",
        )),
        Err(e) => Err(internal_error("Falha ao consultar o dossiê", e)),
    }
}
