use crate::models::enrollments::entities::EnrollmentDetail;
use crate::models::grades::entities::Grade;
use crate::models::internships::entities::{DocumentStatus, Internship, InternshipDocument};
use crate::models::internships::responses::InternshipDetail;
use crate::models::teacher_assignments::entities::TeacherAssignmentDetail;
use crate::models::users::entities::Eixo;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct StatusCount {
    pub status: DocumentStatus,
    pub count: u64,
}

// 待处理文档，附带学生姓名
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct PendingDocument {
    pub document: InternshipDocument,
    pub student_id: i64,
    pub student_name: String,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct AdminDashboard {
    pub total_students: u64,
    pub total_teachers: u64,
    pub total_staff: u64,
    pub total_leadership: u64,
    pub total_courses: u64,
    pub total_class_sections: u64,
    pub total_internships: u64,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct TeacherDashboard {
    pub assignments: Vec<TeacherAssignmentDetail>,
    pub advised_internships: Vec<InternshipDetail>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct StudentGradeItem {
    pub grade: Grade,
    pub subject_name: String,
    pub display_average: String,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct StudentDashboard {
    pub enrollments: Vec<EnrollmentDetail>,
    pub grades: Vec<StudentGradeItem>,
    pub internship: Option<Internship>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct StaffDashboard {
    pub eixo: Option<Eixo>,
    pub documents_under_review: Vec<PendingDocument>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct LeadershipDashboard {
    /// 等待领导签署的文档
    pub documents_under_review: Vec<PendingDocument>,
    pub counts_by_status: Vec<StatusCount>,
}

// 按角色返回不同内容
#[derive(Debug, Serialize, TS)]
#[serde(tag = "role", rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub enum DashboardResponse {
    Admin(AdminDashboard),
    Teacher(TeacherDashboard),
    Student(StudentDashboard),
    Staff(StaffDashboard),
    Leadership(LeadershipDashboard),
}
