pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;
pub mod validation;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::evaluation_methods::entities::EvaluationMethodDetail;
use crate::models::evaluation_methods::requests::{
    CreateEvaluationMethodRequest, UpdateEvaluationMethodRequest,
};
use crate::models::users::entities::{User, UserRole};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{can_manage_owner, internal_error};
use crate::storage::Storage;

pub struct EvaluationMethodService {
    storage: Option<Arc<dyn Storage>>,
}

impl EvaluationMethodService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_methods(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_methods(self, request).await
    }

    pub async fn create_method(
        &self,
        request: &HttpRequest,
        method: CreateEvaluationMethodRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_method(self, request, method).await
    }

    pub async fn get_method(
        &self,
        request: &HttpRequest,
        method_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_method(self, request, method_id).await
    }

    pub async fn update_method(
        &self,
        request: &HttpRequest,
        method_id: i64,
        update: UpdateEvaluationMethodRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_method(self, request, method_id, update).await
    }

    pub async fn delete_method(
        &self,
        request: &HttpRequest,
        method_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_method(self, request, method_id).await
    }
}

/// 加载评价方法并校验修改权限
///
/// 创建者或其所属机构可以修改；没有创建者的方法只允许机构修改
pub(crate) async fn load_editable_method(
    storage: &Arc<dyn Storage>,
    user: &User,
    method_id: i64,
) -> Result<EvaluationMethodDetail, HttpResponse> {
    let method = match storage.get_evaluation_method(method_id).await {
        Ok(Some(method)) => method,
        Ok(None) => {
            return Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::EvaluationMethodNotFound,
                "Método de avaliação não encontrado",
            )));
        }
        Err(e) => return Err(internal_error("Falha ao consultar o método de avaliação", e)),
    };

    let allowed = match method.method.created_by {
        Some(owner_id) => can_manage_owner(storage, user, owner_id).await?,
        None => user.role == UserRole::Institution,
    };

    if !allowed {
        return Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "Sem permissão para alterar este método de avaliação",
        )));
    }

    Ok(method)
}

/// 被档案使用的方法不能删除或替换选项
pub(crate) async fn ensure_not_in_use(
    storage: &Arc<dyn Storage>,
    method_id: i64,
    message: &str,
) -> Result<(), HttpResponse> {
    match storage.count_dossiers_using_method(method_id).await {
        Ok(0) => Ok(()),
        Ok(_) => Err(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::EvaluationMethodInUse,
            message,
        ))),
        Err(e) => Err(internal_error("Falha ao verificar o uso do método", e)),
    }
}
