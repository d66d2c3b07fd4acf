use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::appraisals::requests::SaveAppraisalRequest;
use crate::models::classrooms::requests::{
    ClassroomListParams, CreateClassroomRequest, EnrollStudentRequest, UpdateClassroomRequest,
};
use crate::models::common::PaginationQuery;
use crate::services::{AppraisalService, ClassroomService};
use crate::utils::{SafeClassroomIdI64, SafeStudentIdI64};

// 懒加载的全局实例
static CLASSROOM_SERVICE: Lazy<ClassroomService> = Lazy::new(ClassroomService::new_lazy);
static APPRAISAL_SERVICE: Lazy<AppraisalService> = Lazy::new(AppraisalService::new_lazy);

// HTTP处理程序
pub async fn list_classrooms(
    req: HttpRequest,
    query: web::Query<ClassroomListParams>,
) -> ActixResult<HttpResponse> {
    CLASSROOM_SERVICE
        .list_classrooms(&req, query.into_inner())
        .await
}

pub async fn create_classroom(
    req: HttpRequest,
    classroom: web::Json<CreateClassroomRequest>,
) -> ActixResult<HttpResponse> {
    CLASSROOM_SERVICE
        .create_classroom(&req, classroom.into_inner())
        .await
}

pub async fn get_classroom(
    req: HttpRequest,
    classroom_id: SafeClassroomIdI64,
) -> ActixResult<HttpResponse> {
    CLASSROOM_SERVICE.get_classroom(&req, classroom_id.0).await
}

pub async fn update_classroom(
    req: HttpRequest,
    classroom_id: SafeClassroomIdI64,
    update: web::Json<UpdateClassroomRequest>,
) -> ActixResult<HttpResponse> {
    CLASSROOM_SERVICE
        .update_classroom(&req, classroom_id.0, update.into_inner())
        .await
}

pub async fn delete_classroom(
    req: HttpRequest,
    classroom_id: SafeClassroomIdI64,
) -> ActixResult<HttpResponse> {
    CLASSROOM_SERVICE
        .delete_classroom(&req, classroom_id.0)
        .await
}

pub async fn list_roster(
    req: HttpRequest,
    classroom_id: SafeClassroomIdI64,
    query: web::Query<PaginationQuery>,
) -> ActixResult<HttpResponse> {
    CLASSROOM_SERVICE
        .list_roster(&req, classroom_id.0, query.into_inner())
        .await
}

pub async fn enroll_student(
    req: HttpRequest,
    classroom_id: SafeClassroomIdI64,
    enroll: web::Json<EnrollStudentRequest>,
) -> ActixResult<HttpResponse> {
    CLASSROOM_SERVICE
        .enroll_student(&req, classroom_id.0, enroll.into_inner())
        .await
}

pub async fn remove_student(
    req: HttpRequest,
    classroom_id: SafeClassroomIdI64,
    student_id: SafeStudentIdI64,
) -> ActixResult<HttpResponse> {
    CLASSROOM_SERVICE
        .remove_student(&req, classroom_id.0, student_id.0)
        .await
}

pub async fn list_classroom_appraisals(
    req: HttpRequest,
    classroom_id: SafeClassroomIdI64,
) -> ActixResult<HttpResponse> {
    APPRAISAL_SERVICE
        .list_classroom_appraisals(&req, classroom_id.0)
        .await
}

pub async fn get_student_appraisal(
    req: HttpRequest,
    classroom_id: SafeClassroomIdI64,
    student_id: SafeStudentIdI64,
) -> ActixResult<HttpResponse> {
    APPRAISAL_SERVICE
        .get_student_appraisal(&req, classroom_id.0, student_id.0)
        .await
}

pub async fn save_student_appraisal(
    req: HttpRequest,
    classroom_id: SafeClassroomIdI64,
    student_id: SafeStudentIdI64,
    body: web::Json<SaveAppraisalRequest>,
) -> ActixResult<HttpResponse> {
    APPRAISAL_SERVICE
        .save_appraisal(&req, classroom_id.0, student_id.0, body.into_inner())
        .await
}

// 配置路由：教授管理自己的班级，机构管理名下教授的班级（归属在服务层校验）
pub fn configure_classrooms_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/classrooms")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_classrooms))
                    .route(web::post().to(create_classroom)),
            )
            .service(
                web::resource("/{classroom_id}")
                    .route(web::get().to(get_classroom))
                    .route(web::put().to(update_classroom))
                    .route(web::delete().to(delete_classroom)),
            )
            .service(
                web::resource("/{classroom_id}/students")
                    .route(web::get().to(list_roster))
                    .route(web::post().to(enroll_student)),
            )
            .service(
                web::resource("/{classroom_id}/students/{student_id}")
                    .route(web::delete().to(remove_student)),
            )
            .service(
                web::resource("/{classroom_id}/students/{student_id}/appraisal")
                    .route(web::get().to(get_student_appraisal))
                    .route(web::put().to(save_student_appraisal)),
            )
            .service(
                web::resource("/{classroom_id}/appraisals")
                    .route(web::get().to(list_classroom_appraisals)),
            ),
    );
}
