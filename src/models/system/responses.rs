use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SystemInfoResponse {
    pub system_name: String, // 系统名称
    pub version: String,     // 版本号
    pub environment: String, // 运行环境
    pub started_at: chrono::DateTime<chrono::Utc>,
}
