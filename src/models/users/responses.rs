use super::entities::User;
use crate::models::common::PaginationInfo;
use serde::Serialize;

// 账号响应
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: User,
}

// 账号列表响应
#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub items: Vec<User>,
    pub pagination: PaginationInfo,
}

// 机构概览
#[derive(Debug, Serialize)]
pub struct InstitutionOverviewResponse {
    pub professor_count: i64,
    pub classroom_count: i64,
    pub enrolled_student_count: i64,
    pub dossier_count: i64,
    pub appraisal_count: i64,
    pub completed_appraisal_count: i64,
}
