use serde::{Deserialize, Serialize};

use crate::models::evaluation_methods::entities::EvaluationMethodDetail;

// 档案（评分量表）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dossier {
    pub id: i64,
    pub professor_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub evaluation_method_id: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 章节，weight 为百分比
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub id: i64,
    pub dossier_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub weight: f64,
    pub position: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub section_id: i64,
    pub text: String,
    pub position: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionDetail {
    #[serde(flatten)]
    pub section: Section,
    pub questions: Vec<Question>,
}

// 完整档案树：章节按 position 排序，问题同样按 position 排序
#[derive(Debug, Clone, Serialize)]
pub struct DossierDetail {
    #[serde(flatten)]
    pub dossier: Dossier,
    pub evaluation_method: EvaluationMethodDetail,
    pub sections: Vec<SectionDetail>,
}

impl DossierDetail {
    pub fn question_count(&self) -> usize {
        self.sections.iter().map(|s| s.questions.len()).sum()
    }

    pub fn contains_question(&self, question_id: i64) -> bool {
        self.sections
            .iter()
            .any(|s| s.questions.iter().any(|q| q.id == question_id))
    }
}
