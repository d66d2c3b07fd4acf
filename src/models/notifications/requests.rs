use crate::models::common::PaginationQuery;
use crate::models::common::pagination::deserialize_optional_bool;
use serde::Deserialize;

// 通知列表查询参数
#[derive(Debug, Deserialize)]
pub struct NotificationListQuery {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_bool")]
    pub unread_only: Option<bool>,
}

// 机构发送通知请求；user_id 缺省时发送给名下所有教授
#[derive(Debug, Deserialize)]
pub struct SendNotificationRequest {
    pub user_id: Option<i64>,
    pub title: String,
    pub content: String,
    pub reference_type: Option<String>,
    pub reference_id: Option<i64>,
}

// 创建通知（用于存储层）
#[derive(Debug, Clone)]
pub struct CreateNotificationRequest {
    pub user_id: i64,
    pub title: String,
    pub content: String,
    pub reference_type: Option<String>,
    pub reference_id: Option<i64>,
}
