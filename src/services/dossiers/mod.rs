pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;
pub mod validation;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::dossiers::requests::{
    CreateDossierRequest, DossierListParams, UpdateDossierRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::internal_error;
use crate::storage::Storage;

pub struct DossierService {
    storage: Option<Arc<dyn Storage>>,
}

impl DossierService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_dossiers(
        &self,
        request: &HttpRequest,
        query: DossierListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_dossiers(self, request, query).await
    }

    pub async fn create_dossier(
        &self,
        request: &HttpRequest,
        dossier: CreateDossierRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_dossier(self, request, dossier).await
    }

    // 完整档案树
    pub async fn get_dossier(
        &self,
        request: &HttpRequest,
        dossier_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_dossier(self, request, dossier_id).await
    }

    pub async fn update_dossier(
        &self,
        request: &HttpRequest,
        dossier_id: i64,
        update: UpdateDossierRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_dossier(self, request, dossier_id, update).await
    }

    pub async fn delete_dossier(
        &self,
        request: &HttpRequest,
        dossier_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_dossier(self, request, dossier_id).await
    }
}

/// 档案引用的评价方法必须存在
pub(crate) async fn ensure_method_exists(
    storage: &Arc<dyn Storage>,
    method_id: i64,
) -> Result<(), HttpResponse> {
    match storage.get_evaluation_method(method_id).await {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::EvaluationMethodNotFound,
            "Método de avaliação não encontrado",
        ))),
        Err(e) => Err(internal_error("Falha ao consultar o método de avaliação", e)),
    }
}
