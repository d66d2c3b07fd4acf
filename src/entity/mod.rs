//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。

pub mod prelude;

pub mod appraisals;
pub mod classroom_students;
pub mod classrooms;
pub mod dossiers;
pub mod evaluation_methods;
pub mod evaluation_types;
pub mod evaluations;
pub mod notifications;
pub mod questions;
pub mod sections;
pub mod students;
pub mod users;

use chrono::{DateTime, Utc};

// 数据库中时间统一以 unix 秒存储
pub(crate) fn to_datetime(ts: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()
}
