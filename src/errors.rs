//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

use sea_orm::{DbErr, SqlErr};

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_system_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum DossierSystemError {
            $($variant(String),)*
        }

        impl DossierSystemError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(DossierSystemError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(DossierSystemError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(DossierSystemError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl DossierSystemError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        DossierSystemError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_system_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    FileOperation("E004", "File Operation Error"),
    Validation("E005", "Validation Error"),
    NotFound("E006", "Resource Not Found"),
    Conflict("E007", "Resource Conflict"),
    Serialization("E008", "Serialization Error"),
    Authentication("E009", "Authentication Error"),
    Authorization("E010", "Authorization Error"),
}

impl DossierSystemError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 将写操作的数据库错误按约束类型归类
    ///
    /// 唯一约束冲突 -> Conflict，外键约束失败 -> Validation，其余 -> DatabaseOperation
    pub fn from_write_err(context: &str, err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                DossierSystemError::conflict(format!("{context}: {detail}"))
            }
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
                DossierSystemError::validation(format!("{context}: {detail}"))
            }
            _ => DossierSystemError::database_operation(format!("{context}: {err}")),
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, DossierSystemError::Conflict(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, DossierSystemError::Validation(_))
    }
}

impl fmt::Display for DossierSystemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for DossierSystemError {}

// 为常见的错误类型实现 From trait
impl From<DbErr> for DossierSystemError {
    fn from(err: DbErr) -> Self {
        DossierSystemError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for DossierSystemError {
    fn from(err: std::io::Error) -> Self {
        DossierSystemError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for DossierSystemError {
    fn from(err: serde_json::Error) -> Self {
        DossierSystemError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DossierSystemError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(DossierSystemError::database_config("test").code(), "E001");
        assert_eq!(DossierSystemError::validation("test").code(), "E005");
        assert_eq!(DossierSystemError::conflict("test").code(), "E007");
        assert_eq!(DossierSystemError::authorization("test").code(), "E010");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            DossierSystemError::not_found("test").error_type(),
            "Resource Not Found"
        );
        assert_eq!(
            DossierSystemError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = DossierSystemError::validation("Invalid weight");
        assert_eq!(err.message(), "Invalid weight");
    }

    #[test]
    fn test_format_simple() {
        let err = DossierSystemError::conflict("registration already used");
        let formatted = err.format_simple();
        assert!(formatted.contains("Resource Conflict"));
        assert!(formatted.contains("registration already used"));
    }

    #[test]
    fn test_unclassified_write_error_is_database_operation() {
        let err = DossierSystemError::from_write_err(
            "创建学生失败",
            DbErr::Custom("disk full".to_string()),
        );
        assert_eq!(err.code(), "E003");
        assert!(err.message().starts_with("创建学生失败"));
        assert!(!err.is_conflict());
    }
}
