use serde::Deserialize;

// 设置学生注册（存储层使用）
#[derive(Debug, Clone, Deserialize)]
pub struct SetEnrollment {
    pub student_id: i64,
    pub class_section_id: i64,
    pub enrolled_on: chrono::NaiveDate,
}
