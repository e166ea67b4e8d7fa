use crate::models::class_sections::entities::ClassSection;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 学生注册（学生-班级）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct Enrollment {
    pub id: i64,
    pub student_id: i64,
    pub class_section_id: i64,
    pub enrolled_on: NaiveDate,
    /// 学期，如 2025.1
    pub academic_term: String,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct EnrollmentDetail {
    #[serde(flatten)]
    #[ts(flatten)]
    pub enrollment: Enrollment,
    pub class_section: ClassSection,
}

/// 根据日期计算学期：上半年为 1，下半年为 2
pub fn academic_term_for(date: NaiveDate) -> String {
    let semester = if date.month() <= 6 { 1 } else { 2 };
    format!("{}.{semester}", date.year())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_academic_term_first_semester() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
        assert_eq!(academic_term_for(date), "2025.1");
    }

    #[test]
    fn test_academic_term_second_semester() {
        let date = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        assert_eq!(academic_term_for(date), "2025.2");
    }
}
