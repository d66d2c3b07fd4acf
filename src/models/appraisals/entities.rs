use serde::{Deserialize, Serialize};

// 评估：每个（学生, 班级, 档案）至多一条
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appraisal {
    pub id: i64,
    pub student_id: i64,
    pub classroom_id: i64,
    pub dossier_id: i64,
    // 填写评估的教授
    pub professor_id: Option<i64>,
    // 档案被修改后重置为 None
    pub score: Option<f64>,
    pub completed: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 单个问题的作答
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Evaluation {
    pub id: i64,
    pub appraisal_id: i64,
    pub question_id: i64,
    pub evaluation_type_id: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AppraisalDetail {
    #[serde(flatten)]
    pub appraisal: Appraisal,
    pub answers: Vec<Evaluation>,
}
