use super::entities::{UserRole, UserStatus};
use crate::models::common::PaginationQuery;
use serde::Deserialize;

// 教授列表查询参数（来自HTTP请求）
#[derive(Debug, Deserialize)]
pub struct ProfessorListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub status: Option<UserStatus>,
    pub search: Option<String>,
}

// 创建教授请求
#[derive(Debug, Deserialize)]
pub struct CreateProfessorRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub display_name: Option<String>,
}

// 账号创建请求（用于存储层，password 已哈希）
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
    pub display_name: Option<String>,
    pub institution_id: Option<i64>,
    pub email_verified: bool,
}

// 账号更新请求
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub display_name: Option<String>,
    pub status: Option<UserStatus>,
    pub email_verified: Option<bool>,
}

// 账号列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct UserListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub role: Option<UserRole>,
    pub status: Option<UserStatus>,
    pub institution_id: Option<i64>,
    pub search: Option<String>,
}
