use super::entities::Subject;
use crate::models::teacher_assignments::entities::TeacherAssignmentDetail;
use crate::models::users::entities::User;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct SubjectListResponse {
    pub items: Vec<Subject>,
}

// 教授该科目的教师及其任课
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct SubjectTeacher {
    pub teacher: User,
    pub assignments: Vec<TeacherAssignmentDetail>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct SubjectDetailResponse {
    pub subject: Subject,
    pub class_section_ids: Vec<i64>,
    pub teachers: Vec<SubjectTeacher>,
}
