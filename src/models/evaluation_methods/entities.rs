use serde::{Deserialize, Serialize};

// 评价方法：一组有序的评分选项
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationMethod {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_by: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 评分选项
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EvaluationType {
    pub id: i64,
    pub method_id: i64,
    pub name: String,
    pub value: f64,
    pub position: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct EvaluationMethodDetail {
    #[serde(flatten)]
    pub method: EvaluationMethod,
    pub types: Vec<EvaluationType>,
}

impl EvaluationMethodDetail {
    pub fn find_type(&self, type_id: i64) -> Option<&EvaluationType> {
        self.types.iter().find(|t| t.id == type_id)
    }
}
