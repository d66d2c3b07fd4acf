use serde::{Deserialize, Serialize};

use crate::models::students::entities::Student;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classroom {
    // 班级ID
    pub id: i64,
    // 负责教授ID
    pub professor_id: i64,
    // 班级名称
    pub name: String,
    // 班级描述
    pub description: Option<String>,
    // 当前使用的档案
    pub dossier_id: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 班级详情（附带学生人数）
#[derive(Debug, Clone, Serialize)]
pub struct ClassroomDetail {
    #[serde(flatten)]
    pub classroom: Classroom,
    pub student_count: i64,
}

// 班级-学生关联
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassroomStudent {
    pub id: i64,
    pub classroom_id: i64,
    pub student_id: i64,
    pub joined_at: chrono::DateTime<chrono::Utc>,
}

// 名单条目
#[derive(Debug, Clone, Serialize)]
pub struct RosterEntry {
    pub enrollment_id: i64,
    pub joined_at: chrono::DateTime<chrono::Utc>,
    pub student: Student,
}
