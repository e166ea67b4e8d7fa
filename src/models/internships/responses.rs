use super::entities::{Internship, InternshipDocument};
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

// 附带学生和指导教师姓名的实习档案
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/internship.ts")]
pub struct InternshipDetail {
    #[serde(flatten)]
    #[ts(flatten)]
    pub internship: Internship,
    pub student_name: String,
    pub advisor_name: Option<String>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/internship.ts")]
pub struct InternshipListResponse {
    pub items: Vec<InternshipDetail>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/internship.ts")]
pub struct InternshipDetailResponse {
    pub internship: InternshipDetail,
    /// 当前用户可见的文档
    pub documents: Vec<InternshipDocument>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/internship.ts")]
pub struct DocumentListResponse {
    pub items: Vec<InternshipDocument>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/internship.ts")]
pub struct DocumentResponse {
    pub document: InternshipDocument,
}
