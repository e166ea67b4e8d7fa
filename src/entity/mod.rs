//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。

pub mod class_sections;
pub mod courses;
pub mod enrollments;
pub mod files;
pub mod grades;
pub mod internship_documents;
pub mod internships;
pub mod subject_class_sections;
pub mod subjects;
pub mod system_settings;
pub mod system_settings_audit;
pub mod teacher_assignments;
pub mod users;

use chrono::{DateTime, Utc};

/// 秒级时间戳转换为 UTC 时间，非法值回退到 Unix 纪元
pub(crate) fn from_timestamp(ts: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()
}
