use super::entities::ClassSection;
use crate::models::users::entities::User;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class_section.ts")]
pub struct ClassSectionListResponse {
    pub items: Vec<ClassSection>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class_section.ts")]
pub struct ClassSectionDetailResponse {
    pub section: ClassSection,
    pub students: Vec<User>,
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class_section.ts")]
pub struct YearModuleOption {
    pub id: String,
    pub year_module: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class_section.ts")]
pub struct ShiftOption {
    pub id: String,
    pub display: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class_section.ts")]
pub struct SectionOption {
    pub id: i64,
    pub label: String,
}

// 级联选择结果，按 target 返回不同形状
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(untagged)]
#[ts(export, export_to = "../frontend/src/types/generated/class_section.ts")]
pub enum ClassOptions {
    YearModules(Vec<YearModuleOption>),
    Shifts(Vec<ShiftOption>),
    Sections(Vec<SectionOption>),
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class_section.ts")]
pub struct ClassOptionsResponse {
    pub options: ClassOptions,
}
