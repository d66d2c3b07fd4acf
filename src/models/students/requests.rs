use crate::models::common::PaginationQuery;
use serde::Deserialize;

// 学生列表查询参数（来自HTTP请求）
#[derive(Debug, Deserialize)]
pub struct StudentListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
}

// 创建学生请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStudentRequest {
    pub registration: String,
    pub name: String,
    pub email: Option<String>,
}

// 更新学生请求
#[derive(Debug, Default, Deserialize)]
pub struct UpdateStudentRequest {
    pub registration: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
}

// 学生列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct StudentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub search: Option<String>,
}
