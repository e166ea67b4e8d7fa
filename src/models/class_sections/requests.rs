use super::entities::{Modality, Shift, YearModule};
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class_section.ts")]
pub struct CreateClassSectionRequest {
    pub course_id: i64,
    pub year_module: YearModule,
    pub shift: Shift,
    #[serde(default)]
    pub label: String,
    pub modality: Option<Modality>,
    pub room: Option<String>,
}

// 班级列表筛选
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class_section.ts")]
pub struct ClassSectionListQuery {
    pub course_id: Option<i64>,
    pub year_module: Option<YearModule>,
    pub shift: Option<Shift>,
    pub modality: Option<Modality>,
}

// 级联选择查询参数
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class_section.ts")]
pub struct ClassOptionsQuery {
    pub course_id: Option<i64>,
    pub year_module: Option<YearModule>,
    pub shift: Option<Shift>,
    pub target: Option<String>,
}

impl ClassOptionsQuery {
    pub fn filter(&self) -> ClassSectionListQuery {
        ClassSectionListQuery {
            course_id: self.course_id,
            year_module: self.year_module,
            shift: self.shift,
            modality: None,
        }
    }
}

// 新建班级（用于存储层，教学模式已确定）
#[derive(Debug, Clone)]
pub struct NewClassSection {
    pub course_id: i64,
    pub year_module: YearModule,
    pub shift: Shift,
    pub label: String,
    pub modality: Modality,
    pub room: Option<String>,
}
