//! 路径参数提取器
//!
//! 每个提取器按名称读取一个路径参数，只接受正整数；否则直接返回 400。

use actix_web::dev::Payload;
use actix_web::error::InternalError;
use actix_web::{FromRequest, HttpRequest, HttpResponse};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

fn parse_positive_id(req: &HttpRequest, param: &str) -> Result<i64, actix_web::Error> {
    let raw = req.match_info().get(param).unwrap_or_default();
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => {
            let message = format!("Parâmetro '{param}' inválido: '{raw}'");
            let response = HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::BadRequest, &message));
            Err(InternalError::from_response(message, response).into())
        }
    }
}

macro_rules! define_safe_id_extractors {
    ($($name:ident => $param:literal),* $(,)?) => {
        $(
            #[derive(Debug, Clone, Copy)]
            pub struct $name(pub i64);

            impl FromRequest for $name {
                type Error = actix_web::Error;
                type Future = Ready<Result<Self, Self::Error>>;

                fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
                    ready(parse_positive_id(req, $param).map($name))
                }
            }
        )*
    };
}

define_safe_id_extractors! {
    SafeProfessorIdI64 => "professor_id",
    SafeStudentIdI64 => "student_id",
    SafeClassroomIdI64 => "classroom_id",
    SafeEvaluationMethodIdI64 => "method_id",
    SafeDossierIdI64 => "dossier_id",
    SafeAppraisalIdI64 => "appraisal_id",
    SafeNotificationIdI64 => "notification_id",
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_accepts_positive_id() {
        let req = TestRequest::default()
            .param("classroom_id", "17")
            .to_http_request();
        let id = SafeClassroomIdI64::extract(&req).await.unwrap();
        assert_eq!(id.0, 17);
    }

    #[actix_web::test]
    async fn test_rejects_invalid_ids() {
        for raw in ["0", "-3", "abc", "9999999999999999999999"] {
            let req = TestRequest::default()
                .param("student_id", raw)
                .to_http_request();
            let err = SafeStudentIdI64::extract(&req).await.unwrap_err();
            assert_eq!(
                err.as_response_error().status_code(),
                actix_web::http::StatusCode::BAD_REQUEST
            );
        }
    }
}
