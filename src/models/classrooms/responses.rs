use super::entities::{ClassroomDetail, RosterEntry};
use crate::models::common::PaginationInfo;
use serde::Serialize;

// 班级列表响应
#[derive(Debug, Serialize)]
pub struct ClassroomListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<ClassroomDetail>,
}

// 班级名单响应
#[derive(Debug, Serialize)]
pub struct RosterResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<RosterEntry>,
}
