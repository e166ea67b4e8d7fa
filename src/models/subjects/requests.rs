use super::entities::DEFAULT_WORKLOAD_HOURS;
use serde::Deserialize;
use ts_rs::TS;

fn default_workload() -> i32 {
    DEFAULT_WORKLOAD_HOURS
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct CreateSubjectRequest {
    pub name: String,
    #[serde(default = "default_workload")]
    pub workload_hours: i32,
    /// 开设该科目的班级
    #[serde(default)]
    pub class_section_ids: Vec<i64>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct UpdateSubjectRequest {
    pub name: Option<String>,
    pub workload_hours: Option<i32>,
    pub class_section_ids: Option<Vec<i64>>,
}
