use super::entities::EvaluationMethodDetail;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct EvaluationMethodListResponse {
    pub items: Vec<EvaluationMethodDetail>,
}
