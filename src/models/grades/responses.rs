use super::entities::{Grade, GradeStatus};
use crate::models::class_sections::entities::ClassSection;
use crate::models::subjects::entities::Subject;
use crate::models::users::entities::User;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct SaveGradeResponse {
    pub grade: Grade,
    pub final_status: GradeStatus,
    pub final_average: Option<f64>,
    pub display_average: String,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeSheetRow {
    pub student: User,
    pub grade: Option<Grade>,
}

// 某科目在某班级的成绩表
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeSheetResponse {
    pub subject: Subject,
    pub section: ClassSection,
    pub rows: Vec<GradeSheetRow>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct ReportCardRow {
    pub subject: Subject,
    pub class_section_id: i64,
    pub grade: Option<Grade>,
    pub display_average: String,
}

// 学生成绩报告单
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct ReportCardResponse {
    pub rows: Vec<ReportCardRow>,
}
