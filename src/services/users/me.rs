use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::models::{ApiResponse, users::responses::UserResponse};
use crate::services::access::current_user;

// 中间件已按令牌加载账号，这里直接返回请求扩展中的最新状态
pub async fn get_me(_service: &UserService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        UserResponse { user },
        "Conta obtida com sucesso",
    )))
}
