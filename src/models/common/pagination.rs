use serde::{Deserialize, Deserializer, Serialize};

// 分页查询参数
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationQuery {
    #[serde(
        default = "default_page",
        deserialize_with = "deserialize_string_to_i64"
    )]
    pub page: i64,
    #[serde(
        default = "default_size",
        deserialize_with = "deserialize_string_to_i64"
    )]
    pub size: i64,
}

// 分页响应信息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationInfo {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl PaginationInfo {
    pub fn new(page: u64, page_size: u64, total: u64, total_pages: u64) -> Self {
        Self {
            page: page as i64,
            page_size: page_size as i64,
            total: total as i64,
            total_pages: total_pages as i64,
        }
    }
}

/// 规范化分页参数：page 从 1 开始，size 限制在 1..=100
pub fn normalize_page(page: Option<i64>, size: Option<i64>) -> (u64, u64) {
    let page = page.unwrap_or(1).max(1) as u64;
    let size = size.unwrap_or(10).clamp(1, 100) as u64;
    (page, size)
}

// `#[serde(flatten)]` 与 query string 组合时所有值都以字符串形式到达，
// 以下反序列化函数同时接受原生类型与字符串
#[derive(Deserialize)]
#[serde(untagged)]
enum StringOr<T> {
    Native(T),
    Text(String),
}

// 自定义反序列化函数，支持字符串到i64的转换
fn deserialize_string_to_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match StringOr::<i64>::deserialize(deserializer)? {
        StringOr::Native(value) => Ok(value),
        StringOr::Text(value) => value
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("invalid integer: '{value}'"))),
    }
}

/// 可选整数（支持字符串）
pub fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<StringOr<i64>>::deserialize(deserializer)? {
        None => Ok(None),
        Some(StringOr::Native(value)) => Ok(Some(value)),
        Some(StringOr::Text(value)) if value.trim().is_empty() => Ok(None),
        Some(StringOr::Text(value)) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("invalid integer: '{value}'"))),
    }
}

/// 可选布尔值（支持 "true"/"false"/"1"/"0"）
pub fn deserialize_optional_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<StringOr<bool>>::deserialize(deserializer)? {
        None => Ok(None),
        Some(StringOr::Native(value)) => Ok(Some(value)),
        Some(StringOr::Text(value)) => match value.trim() {
            "" => Ok(None),
            "true" | "1" => Ok(Some(true)),
            "false" | "0" => Ok(Some(false)),
            other => Err(D::Error::custom(format!("invalid boolean: '{other}'"))),
        },
    }
}

fn default_page() -> i64 {
    1
}

fn default_size() -> i64 {
    10
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self { page: 1, size: 10 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct ListParams {
        #[serde(flatten)]
        pagination: PaginationQuery,
        #[serde(default, deserialize_with = "deserialize_optional_i64")]
        owner_id: Option<i64>,
        #[serde(default, deserialize_with = "deserialize_optional_bool")]
        unread_only: Option<bool>,
    }

    #[test]
    fn test_pagination_accepts_strings_and_numbers() {
        let params: ListParams =
            serde_json::from_str(r#"{"page":"3","size":25,"owner_id":"7","unread_only":"true"}"#)
                .unwrap();
        assert_eq!(params.pagination.page, 3);
        assert_eq!(params.pagination.size, 25);
        assert_eq!(params.owner_id, Some(7));
        assert_eq!(params.unread_only, Some(true));
    }

    #[test]
    fn test_pagination_defaults() {
        let params: ListParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.pagination.page, 1);
        assert_eq!(params.pagination.size, 10);
        assert_eq!(params.owner_id, None);
        assert_eq!(params.unread_only, None);
    }

    #[test]
    fn test_invalid_page_is_rejected() {
        let result: Result<ListParams, _> = serde_json::from_str(r#"{"page":"abc"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_normalize_page() {
        assert_eq!(normalize_page(None, None), (1, 10));
        assert_eq!(normalize_page(Some(0), Some(1000)), (1, 100));
        assert_eq!(normalize_page(Some(4), Some(0)), (4, 1));
    }
}
