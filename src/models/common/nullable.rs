//! 部分更新字段：缺失 / 显式 null / 有值 三种状态
//!
//! 与 `#[serde(default, deserialize_with = "deserialize_present")]` 搭配使用：
//! 字段缺失得到 `None`，`null` 得到 `Some(None)`，有值得到 `Some(Some(v))`。

use serde::{Deserialize, Deserializer};

pub fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "deserialize_present")]
        description: Option<Option<String>>,
    }

    #[test]
    fn test_absent_null_and_value() {
        let absent: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.description, None);

        let cleared: Patch = serde_json::from_str(r#"{"description":null}"#).unwrap();
        assert_eq!(cleared.description, Some(None));

        let set: Patch = serde_json::from_str(r#"{"description":"Turma da manhã"}"#).unwrap();
        assert_eq!(set.description, Some(Some("Turma da manhã".to_string())));
    }
}
