pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::users::entities::{User, UserRole};
use crate::models::users::requests::{
    CreateProfessorRequest, ProfessorListParams, UpdateUserRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct ProfessorService {
    storage: Option<Arc<dyn Storage>>,
}

impl ProfessorService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_professors(
        &self,
        request: &HttpRequest,
        query: ProfessorListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_professors(self, request, query).await
    }

    pub async fn create_professor(
        &self,
        request: &HttpRequest,
        professor: CreateProfessorRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_professor(self, request, professor).await
    }

    pub async fn get_professor(
        &self,
        request: &HttpRequest,
        professor_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_professor(self, request, professor_id).await
    }

    pub async fn update_professor(
        &self,
        request: &HttpRequest,
        professor_id: i64,
        update: UpdateUserRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_professor(self, request, professor_id, update).await
    }

    pub async fn delete_professor(
        &self,
        request: &HttpRequest,
        professor_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_professor(self, request, professor_id).await
    }
}

/// 加载机构名下的教授；不存在或属于其他机构时统一返回 404
pub(crate) async fn load_own_professor(
    storage: &Arc<dyn Storage>,
    institution: &User,
    professor_id: i64,
) -> Result<User, HttpResponse> {
    match storage.get_user_by_id(professor_id).await {
        Ok(Some(user))
            if user.role == UserRole::Professor && user.institution_id == Some(institution.id) =>
        {
            Ok(user)
        }
        Ok(_) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "Professor não encontrado",
        ))),
        Err(e) => Err(super::access::internal_error(
            "Falha ao consultar o professor",
            e,
        )),
    }
}
