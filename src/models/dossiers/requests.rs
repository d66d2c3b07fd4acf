use crate::models::common::PaginationQuery;
use crate::models::common::nullable::deserialize_present;
use crate::models::common::pagination::deserialize_optional_i64;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct DossierListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub professor_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuestionInput {
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SectionInput {
    pub name: String,
    pub description: Option<String>,
    pub weight: f64,
    #[serde(default)]
    pub questions: Vec<QuestionInput>,
}

// 创建档案请求；机构创建时必须指定 professor_id
#[derive(Debug, Deserialize)]
pub struct CreateDossierRequest {
    pub professor_id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub evaluation_method_id: i64,
    #[serde(default)]
    pub sections: Vec<SectionInput>,
}

// 更新档案请求；sections 存在时整体替换章节树，description 为 null 时清除
#[derive(Debug, Default, Deserialize)]
pub struct UpdateDossierRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub description: Option<Option<String>>,
    pub evaluation_method_id: Option<i64>,
    pub sections: Option<Vec<SectionInput>>,
}

// 存储层新建档案参数
#[derive(Debug, Clone)]
pub struct NewDossier {
    pub professor_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub evaluation_method_id: i64,
    pub sections: Vec<SectionInput>,
}

// 档案列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct DossierListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub professor_id: Option<i64>,
    pub institution_id: Option<i64>,
    pub search: Option<String>,
}
