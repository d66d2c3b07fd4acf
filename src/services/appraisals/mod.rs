pub mod delete;
pub mod get;
pub mod list;
pub mod report;
pub mod save;
pub mod scoring;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::appraisals::entities::AppraisalDetail;
use crate::models::appraisals::requests::SaveAppraisalRequest;
use crate::models::classrooms::entities::Classroom;
use crate::models::users::entities::User;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{internal_error, load_classroom};
use crate::storage::Storage;

pub struct AppraisalService {
    storage: Option<Arc<dyn Storage>>,
}

impl AppraisalService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    // 保存（新建或覆盖）学生在班级当前档案下的评估
    pub async fn save_appraisal(
        &self,
        request: &HttpRequest,
        classroom_id: i64,
        student_id: i64,
        body: SaveAppraisalRequest,
    ) -> ActixResult<HttpResponse> {
        save::save_appraisal(self, request, classroom_id, student_id, body).await
    }

    pub async fn get_student_appraisal(
        &self,
        request: &HttpRequest,
        classroom_id: i64,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_student_appraisal(self, request, classroom_id, student_id).await
    }

    pub async fn list_classroom_appraisals(
        &self,
        request: &HttpRequest,
        classroom_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_classroom_appraisals(self, request, classroom_id).await
    }

    pub async fn get_appraisal(
        &self,
        request: &HttpRequest,
        appraisal_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_appraisal(self, request, appraisal_id).await
    }

    // 报告数据
    pub async fn get_report(
        &self,
        request: &HttpRequest,
        appraisal_id: i64,
    ) -> ActixResult<HttpResponse> {
        report::get_report(self, request, appraisal_id).await
    }

    pub async fn delete_appraisal(
        &self,
        request: &HttpRequest,
        appraisal_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_appraisal(self, request, appraisal_id).await
    }
}

/// 加载评估，并通过其所在班级校验归属
pub(crate) async fn load_appraisal(
    storage: &Arc<dyn Storage>,
    user: &User,
    appraisal_id: i64,
) -> Result<(AppraisalDetail, Classroom), HttpResponse> {
    let detail = match storage.get_appraisal_by_id(appraisal_id).await {
        Ok(Some(detail)) => detail,
        Ok(None) => {
            return Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AppraisalNotFound,
                "Avaliação não encontrada",
            )));
        }
        Err(e) => return Err(internal_error("Falha ao consultar a avaliação", e)),
    };

    let classroom = load_classroom(storage, user, detail.appraisal.classroom_id).await?;

    Ok((detail, classroom))
}

/// 班级必须已关联档案
pub(crate) fn classroom_dossier(classroom: &Classroom) -> Result<i64, HttpResponse> {
    classroom.dossier_id.ok_or_else(|| {
        HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ClassroomWithoutDossier,
            "A turma não possui dossiê associado",
        ))
    })
}
