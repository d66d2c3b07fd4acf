use serde::Serialize;

use super::entities::Appraisal;
use crate::models::classrooms::entities::Classroom;
use crate::models::dossiers::entities::Dossier;
use crate::models::evaluation_methods::entities::EvaluationMethodDetail;
use crate::models::students::entities::Student;

// 班级评估总览中的一行；未评估的学生 appraisal 相关字段为 null
#[derive(Debug, Serialize)]
pub struct ClassroomAppraisalRow {
    pub student: Student,
    pub appraisal_id: Option<i64>,
    pub score: Option<f64>,
    pub completed: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct ClassroomAppraisalsResponse {
    pub classroom_id: i64,
    pub dossier_id: i64,
    pub items: Vec<ClassroomAppraisalRow>,
}

#[derive(Debug, Serialize)]
pub struct QuestionReport {
    pub question_id: i64,
    pub text: String,
    pub evaluation_type_id: Option<i64>,
    pub option_name: Option<String>,
    pub value: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct SectionReport {
    pub section_id: i64,
    pub name: String,
    pub weight: f64,
    pub question_count: usize,
    pub answered_count: usize,
    // 章节平均分（选项分值之和 / 问题数）
    pub average: f64,
    // 对总分的贡献（average * weight / 100）
    pub contribution: f64,
    pub questions: Vec<QuestionReport>,
}

// 评估报告数据
#[derive(Debug, Serialize)]
pub struct AppraisalReport {
    pub appraisal: Appraisal,
    pub student: Student,
    pub classroom: Classroom,
    pub dossier: Dossier,
    pub evaluation_method: EvaluationMethodDetail,
    pub sections: Vec<SectionReport>,
    pub total_score: f64,
    pub generated_at: chrono::DateTime<chrono::Utc>,
}
