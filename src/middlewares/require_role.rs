/*!
 * 账号角色门禁中间件
 *
 * 系统只有两种角色：教授（professor）与机构（institution）。
 * 教授资料的管理、机构概览、学生删除以及通知群发只对机构开放，
 * 其余资源的归属校验在各服务内部完成。
 *
 * 本中间件读取 RequireJWT 存入请求扩展的账号，因此必须挂在 RequireJWT 之内：
 *
 * ```rust,ignore
 * web::scope("/api/v1/professors")
 *     .wrap(RequireRole::new(&UserRole::Institution))
 *     .wrap(RequireJWT)
 *     .route("", web::get().to(list_professors));
 * ```
 *
 * actix 中后注册的 wrap 先执行，所以上例先校验令牌，再校验角色。
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::info;

use crate::models::{
    ErrorCode,
    users::entities::{User, UserRole},
};

use super::create_error_response;

/// 角色校验失败的原因
#[derive(Debug, PartialEq)]
pub(crate) enum RoleDenial {
    /// 请求扩展中没有账号，通常是 RequireJWT 未挂载
    Anonymous,
    /// 账号角色不在允许列表中
    Forbidden(UserRole),
}

impl RoleDenial {
    fn into_response_parts(self) -> (StatusCode, ErrorCode, &'static str) {
        match self {
            RoleDenial::Anonymous => (
                StatusCode::UNAUTHORIZED,
                ErrorCode::Unauthorized,
                "Autenticação necessária",
            ),
            RoleDenial::Forbidden(UserRole::Professor) => (
                StatusCode::FORBIDDEN,
                ErrorCode::Forbidden,
                "Operação restrita a instituições",
            ),
            RoleDenial::Forbidden(UserRole::Institution) => (
                StatusCode::FORBIDDEN,
                ErrorCode::Forbidden,
                "Operação restrita a professores",
            ),
        }
    }
}

/// 账号角色是否在允许列表中
pub(crate) fn check_role(user: Option<&User>, allowed: &[UserRole]) -> Result<(), RoleDenial> {
    let user = user.ok_or(RoleDenial::Anonymous)?;
    if allowed.contains(&user.role) {
        Ok(())
    } else {
        Err(RoleDenial::Forbidden(user.role.clone()))
    }
}

#[derive(Clone)]
pub struct RequireRole {
    allowed: Rc<[UserRole]>,
}

impl RequireRole {
    pub fn new(role: &UserRole) -> Self {
        Self {
            allowed: Rc::from(vec![role.clone()]),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleMiddleware {
            service: Rc::new(service),
            allowed: self.allowed.clone(),
        }))
    }
}

pub struct RequireRoleMiddleware<S> {
    service: Rc<S>,
    allowed: Rc<[UserRole]>,
}

impl<S, B> Service<ServiceRequest> for RequireRoleMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_service::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let allowed = self.allowed.clone();

        Box::pin(async move {
            let verdict = {
                let extensions = req.extensions();
                let user = extensions.get::<User>();
                check_role(user, &allowed).map_err(|denial| {
                    if let Some(user) = user {
                        info!(
                            "Role gate rejected account {} ({}) on {}",
                            user.id,
                            user.role,
                            req.path()
                        );
                    } else {
                        info!("Role gate reached without an account on {}", req.path());
                    }
                    denial
                })
            };

            match verdict {
                Ok(()) => Ok(srv.call(req).await?.map_into_left_body()),
                Err(denial) => {
                    let (status, code, message) = denial.into_response_parts();
                    Ok(req.into_response(
                        create_error_response(status, code, message).map_into_right_body(),
                    ))
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserStatus;
    use actix_web::{App, HttpResponse, test, web};
    use chrono::Utc;

    fn account(role: UserRole) -> User {
        User {
            id: 7,
            username: "conta".to_string(),
            email: "conta@example.com".to_string(),
            password_hash: String::new(),
            role,
            status: UserStatus::Active,
            email_verified: true,
            display_name: None,
            institution_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[core::prelude::v1::test]
    fn test_check_role() {
        let allowed = [UserRole::Institution];
        assert_eq!(
            check_role(Some(&account(UserRole::Institution)), &allowed),
            Ok(())
        );
        assert_eq!(
            check_role(Some(&account(UserRole::Professor)), &allowed),
            Err(RoleDenial::Forbidden(UserRole::Professor))
        );
        assert_eq!(check_role(None, &allowed), Err(RoleDenial::Anonymous));
    }

    async fn status_for(user: Option<User>) -> StatusCode {
        let app = test::init_service(
            App::new()
                .wrap(RequireRole::new(&UserRole::Institution))
                .wrap_fn(move |req, srv| {
                    if let Some(user) = user.clone() {
                        req.extensions_mut().insert(user);
                    }
                    srv.call(req)
                })
                .route("/", web::get().to(HttpResponse::Ok)),
        )
        .await;
        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        resp.status()
    }

    #[actix_web::test]
    async fn test_gate_statuses() {
        assert_eq!(
            status_for(Some(account(UserRole::Institution))).await,
            StatusCode::OK
        );
        assert_eq!(
            status_for(Some(account(UserRole::Professor))).await,
            StatusCode::FORBIDDEN
        );
        assert_eq!(status_for(None).await, StatusCode::UNAUTHORIZED);
    }
}
