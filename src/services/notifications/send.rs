use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::NotificationService;
use crate::models::{
    ApiResponse, ErrorCode,
    notifications::{
        requests::{CreateNotificationRequest, SendNotificationRequest},
        responses::SendNotificationResponse,
    },
    users::entities::UserRole,
};
use crate::services::access::{current_user, internal_error};
use crate::utils::validate::non_blank;

pub async fn send_notification(
    service: &NotificationService,
    request: &HttpRequest,
    body: SendNotificationRequest,
) -> ActixResult<HttpResponse> {
    let institution = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    let (Some(title), Some(content)) = (non_blank(&body.title), non_blank(&body.content)) else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Título e conteúdo são obrigatórios",
        )));
    };

    let storage = service.get_storage(request);

    // 指定接收者时必须是本机构的教授；否则发送给名下全部教授
    let recipients = match body.user_id {
        Some(user_id) => match storage.get_user_by_id(user_id).await {
            Ok(Some(user))
                if user.role == UserRole::Professor
                    && user.institution_id == Some(institution.id) =>
            {
                vec![user.id]
            }
            Ok(_) => {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::UserNotFound,
                    "Professor não encontrado",
                )));
            }
            Err(e) => return Ok(internal_error("Falha ao consultar o professor", e)),
        },
        None => match storage.list_professor_ids(institution.id).await {
            Ok(ids) => ids,
            Err(e) => return Ok(internal_error("Falha ao listar professores", e)),
        },
    };

    let notifications: Vec<CreateNotificationRequest> = recipients
        .into_iter()
        .map(|user_id| CreateNotificationRequest {
            user_id,
            title: title.to_string(),
            content: content.to_string(),
            reference_type: body.reference_type.clone(),
            reference_id: body.reference_id,
        })
        .collect();

    match storage.create_notifications_batch(notifications).await {
        Ok(created) => {
            info!(
                "Institution {} sent {} notifications",
                institution.id,
                created.len()
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                SendNotificationResponse {
                    sent_count: created.len() as i64,
                },
                "Notificações enviadas com sucesso",
            )))
        }
        Err(e) => Ok(internal_error("Falha ao enviar notificações", e)),
    }
}
