use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use super::SystemService;
use crate::models::{AppStartTime, ApiResponse, system::responses::SystemInfoResponse};

pub async fn get_info(service: &SystemService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let config = service.get_config();

    // 未注册启动时间时（例如测试中）使用当前时间
    let started_at = request
        .app_data::<web::Data<AppStartTime>>()
        .map(|start| start.start_datetime)
        .unwrap_or_else(chrono::Utc::now);

    let response = SystemInfoResponse {
        system_name: config.app.system_name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: config.app.environment.clone(),
        started_at,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Informações do sistema obtidas com sucesso",
    )))
}
