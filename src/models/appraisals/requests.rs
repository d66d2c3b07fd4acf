use serde::Deserialize;

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct AnswerInput {
    pub question_id: i64,
    pub evaluation_type_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct SaveAppraisalRequest {
    #[serde(default)]
    pub answers: Vec<AnswerInput>,
}

// 存储层保存参数：分数已由服务层计算
#[derive(Debug, Clone)]
pub struct SaveAppraisal {
    pub student_id: i64,
    pub classroom_id: i64,
    pub dossier_id: i64,
    pub professor_id: i64,
    pub score: f64,
    pub completed: bool,
    pub answers: Vec<AnswerInput>,
}
