use super::entities::TeacherAssignmentDetail;
use crate::models::class_sections::entities::ClassSection;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher_assignment.ts")]
pub struct AssignmentListResponse {
    pub items: Vec<TeacherAssignmentDetail>,
}

// 与某个任课匹配的班级
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher_assignment.ts")]
pub struct AssignmentSectionsResponse {
    pub assignment: TeacherAssignmentDetail,
    pub sections: Vec<ClassSection>,
}
