use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{NotificationService, read::load_own_notification};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{current_user, internal_error};

pub async fn delete_notification(
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

    match storage.delete_notification(notification_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Notificação removida"))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NotificationNotFound,
            "Notificação não encontrada",
        ))),
        Err(e) => Ok(internal_error("Falha ao remover a notificação", e)),
    }
}
