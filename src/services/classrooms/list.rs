use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassroomService;
use crate::models::{
    ApiResponse,
    classrooms::requests::{ClassroomListParams, ClassroomListQuery},
    users::entities::UserRole,
};
use crate::services::access::{current_user, internal_error};

pub async fn list_classrooms(
    service: &ClassroomService,
    request: &HttpRequest,
    query: ClassroomListParams,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let mut list_query = ClassroomListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        search: query.search,
        ..Default::default()
    };

    match user.role {
        // 教授只能查询自己的班级
        UserRole::Professor => list_query.professor_id = Some(user.id),
        // 机构查询名下教授的班级，可再按教授筛选
        UserRole::Institution => {
            list_query.institution_id = Some(user.id);
            list_query.professor_id = query.professor_id;
        }
    }

    match storage.list_classrooms_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Lista de turmas obtida com sucesso",
        ))),
        Err(e) => Ok(internal_error("Falha ao listar turmas", e)),
    }
}
