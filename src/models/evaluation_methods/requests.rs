use crate::models::common::nullable::deserialize_present;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct EvaluationTypeInput {
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Deserialize)]
pub struct CreateEvaluationMethodRequest {
    pub name: String,
    pub description: Option<String>,
    pub types: Vec<EvaluationTypeInput>,
}

// 更新评价方法；types 存在时整体替换选项，description 为 null 时清除
#[derive(Debug, Default, Deserialize)]
pub struct UpdateEvaluationMethodRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub description: Option<Option<String>>,
    pub types: Option<Vec<EvaluationTypeInput>>,
}
