use crate::models::class_sections::entities::{ClassSection, Modality, YearModule};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 任课关系：教师 + 科目 + 课程 + 年级/模块 + 教学模式
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher_assignment.ts")]
pub struct TeacherAssignment {
    pub id: i64,
    pub teacher_id: i64,
    pub subject_id: i64,
    pub course_id: i64,
    pub year_module: YearModule,
    pub modality: Modality,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl TeacherAssignment {
    /// 该任课是否覆盖某个班级
    pub fn covers(&self, section: &ClassSection) -> bool {
        self.course_id == section.course_id
            && self.year_module == section.year_module
            && self.modality == section.modality
    }
}

// 附带科目和课程名称的任课信息
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher_assignment.ts")]
pub struct TeacherAssignmentDetail {
    #[serde(flatten)]
    #[ts(flatten)]
    pub assignment: TeacherAssignment,
    pub subject_name: String,
    pub course_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::class_sections::entities::Shift;

    #[test]
    fn test_covers_matches_course_year_and_modality() {
        let assignment = TeacherAssignment {
            id: 1,
            teacher_id: 2,
            subject_id: 3,
            course_id: 4,
            year_module: YearModule::Year1,
            modality: Modality::Epi,
            created_at: chrono::Utc::now(),
        };
        let mut section = ClassSection {
            id: 9,
            course_id: 4,
            course_name: None,
            year_module: YearModule::Year1,
            shift: Shift::Morning,
            label: "M1".into(),
            modality: Modality::Epi,
            room: None,
        };
        assert!(assignment.covers(&section));
        section.year_module = YearModule::Year2;
        assert!(!assignment.covers(&section));
        section.year_module = YearModule::Year1;
        section.course_id = 5;
        assert!(!assignment.covers(&section));
    }
}
