use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::notifications::requests::{NotificationListQuery, SendNotificationRequest};
use crate::models::users::entities::UserRole;
use crate::services::NotificationService;
use crate::utils::SafeNotificationIdI64;

// 懒加载的全局 NotificationService 实例
static NOTIFICATION_SERVICE: Lazy<NotificationService> = Lazy::new(NotificationService::new_lazy);

// HTTP处理程序
pub async fn list_notifications(
    req: HttpRequest,
    query: web::Query<NotificationListQuery>,
) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE
        .list_notifications(&req, query.into_inner())
        .await
}

pub async fn send_notification(
    req: HttpRequest,
    body: web::Json<SendNotificationRequest>,
) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE
        .send_notification(&req, body.into_inner())
        .await
}

pub async fn get_unread_count(req: HttpRequest) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE.get_unread_count(&req).await
}

pub async fn mark_all_as_read(req: HttpRequest) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE.mark_all_as_read(&req).await
}

pub async fn mark_as_read(
    req: HttpRequest,
    notification_id: SafeNotificationIdI64,
) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE
        .mark_as_read(&req, notification_id.0)
        .await
}

pub async fn delete_notification(
    req: HttpRequest,
    notification_id: SafeNotificationIdI64,
) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE
        .delete_notification(&req, notification_id.0)
        .await
}

// 配置路由
pub fn configure_notifications_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/notifications")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_notifications))
                    .route(
                        web::post()
                            .to(send_notification)
                            // 仅机构可向名下教授发送通知
                            .wrap(middlewares::RequireRole::new(&UserRole::Institution)),
                    ),
            )
            // 固定路径需在 /{notification_id} 之前注册
            .service(web::resource("/unread-count").route(web::get().to(get_unread_count)))
            .service(web::resource("/read-all").route(web::put().to(mark_all_as_read)))
            .service(
                web::resource("/{notification_id}").route(web::delete().to(delete_notification)),
            )
            .service(web::resource("/{notification_id}/read").route(web::put().to(mark_as_read))),
    );
}
