pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod roster;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::classrooms::requests::{
    ClassroomListParams, CreateClassroomRequest, EnrollStudentRequest, UpdateClassroomRequest,
};
use crate::models::common::PaginationQuery;
use crate::storage::Storage;

pub struct ClassroomService {
    storage: Option<Arc<dyn Storage>>,
}

impl ClassroomService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    // 获取班级列表
    pub async fn list_classrooms(
        &self,
        request: &HttpRequest,
        query: ClassroomListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_classrooms(self, request, query).await
    }

    pub async fn create_classroom(
        &self,
        request: &HttpRequest,
        classroom: CreateClassroomRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_classroom(self, request, classroom).await
    }

    // 根据班级 ID 获取班级信息
    pub async fn get_classroom(
        &self,
        request: &HttpRequest,
        classroom_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_classroom(self, request, classroom_id).await
    }

    pub async fn update_classroom(
        &self,
        request: &HttpRequest,
        classroom_id: i64,
        update: UpdateClassroomRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_classroom(self, request, classroom_id, update).await
    }

    pub async fn delete_classroom(
        &self,
        request: &HttpRequest,
        classroom_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_classroom(self, request, classroom_id).await
    }

    // 班级名单
    pub async fn list_roster(
        &self,
        request: &HttpRequest,
        classroom_id: i64,
        query: PaginationQuery,
    ) -> ActixResult<HttpResponse> {
        roster::list_roster(self, request, classroom_id, query).await
    }

    pub async fn enroll_student(
        &self,
        request: &HttpRequest,
        classroom_id: i64,
        enroll: EnrollStudentRequest,
    ) -> ActixResult<HttpResponse> {
        roster::enroll_student(self, request, classroom_id, enroll).await
    }

    pub async fn remove_student(
        &self,
        request: &HttpRequest,
        classroom_id: i64,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        roster::remove_student(self, request, classroom_id, student_id).await
    }
}
