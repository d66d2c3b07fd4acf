use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::NotificationService;
use crate::models::{
    ApiResponse, ErrorCode,
    notifications::{entities::Notification, responses::MarkAllReadResponse},
};
use crate::services::access::{current_user, internal_error};
use crate::storage::Storage;

/// 只能操作自己的通知；他人的通知与不存在的通知一样返回 404
pub(crate) async fn load_own_notification(
    storage: &Arc<dyn Storage>,
    user_id: i64,
    notification_id: i64,
) -> Result<Notification, HttpResponse> {
    match storage.get_notification_by_id(notification_id).await {
        Ok(Some(notification)) if notification.user_id == user_id => Ok(notification),
        Ok(_) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NotificationNotFound,
            "Notificação não encontrada",
        ))),
        Err(e) => Err(internal_error("Falha ao consultar a notificação", e)),
    }
}

pub async fn mark_as_read(
    service: &NotificationService,
    request: &HttpRequest,
    notification_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    if let Err(resp) = load_own_notification(&storage, user.id, notification_id).await {
        return Ok(resp);
    }

    match storage.mark_notification_as_read(notification_id).await {
        Ok(_) => Ok(HttpResponse::Ok()
            .json(ApiResponse::success_empty("Notificação marcada como lida"))),
        Err(e) => Ok(internal_error("Falha ao marcar a notificação como lida", e)),
    }
}

pub async fn mark_all_as_read(
    service: &NotificationService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage.mark_all_notifications_as_read(user.id).await {
        Ok(marked_count) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            MarkAllReadResponse { marked_count },
            "Todas as notificações foram marcadas como lidas",
        ))),
        Err(e) => Ok(internal_error("Falha ao marcar as notificações como lidas", e)),
    }
}
