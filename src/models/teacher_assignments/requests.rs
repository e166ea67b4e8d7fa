use crate::models::class_sections::entities::{Modality, YearModule};
use serde::Deserialize;
use ts_rs::TS;

// 任课输入
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher_assignment.ts")]
pub struct AssignmentInput {
    pub subject_id: i64,
    pub course_id: i64,
    pub year_module: YearModule,
    pub modality: Modality,
}
