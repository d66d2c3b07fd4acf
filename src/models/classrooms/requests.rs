use crate::models::common::PaginationQuery;
use crate::models::common::pagination::deserialize_optional_i64;
use crate::models::common::nullable::deserialize_present;
use serde::Deserialize;

// 班级查询参数（来自HTTP请求）
#[derive(Debug, Deserialize)]
pub struct ClassroomListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub professor_id: Option<i64>,
}

// 创建班级请求
//
// # professor_id 字段说明
// - **教授创建**：可选，不填写则使用当前教授自己的 ID
// - **机构创建**：必填，必须是该机构名下的教授
#[derive(Debug, Deserialize)]
pub struct CreateClassroomRequest {
    pub professor_id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub dossier_id: Option<i64>,
}

// 更新班级请求
//
// `description` / `dossier_id`: 字段缺失表示不修改，显式 `null` 表示清除
#[derive(Debug, Default, Deserialize)]
pub struct UpdateClassroomRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub dossier_id: Option<Option<i64>>,
}

// 加入班级请求：指定已有学生，或按学号关联/新建学生
#[derive(Debug, Deserialize)]
pub struct EnrollStudentRequest {
    pub student_id: Option<i64>,
    pub registration: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
}

// 班级列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct ClassroomListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub professor_id: Option<i64>,
    // 机构视角：仅其名下教授的班级
    pub institution_id: Option<i64>,
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dossier_id_absent_null_and_value() {
        let absent: UpdateClassroomRequest = serde_json::from_str(r#"{"name":"A"}"#).unwrap();
        assert_eq!(absent.dossier_id, None);

        let cleared: UpdateClassroomRequest =
            serde_json::from_str(r#"{"dossier_id":null}"#).unwrap();
        assert_eq!(cleared.dossier_id, Some(None));

        let set: UpdateClassroomRequest = serde_json::from_str(r#"{"dossier_id":12}"#).unwrap();
        assert_eq!(set.dossier_id, Some(Some(12)));
    }
}
