use super::entities::User;
use crate::models::class_sections::entities::ClassSection;
use crate::models::common::PaginationInfo;
use crate::models::enrollments::entities::EnrollmentDetail;
use crate::models::teacher_assignments::entities::TeacherAssignmentDetail;
use serde::Serialize;
use ts_rs::TS;

// 用户响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct UserResponse {
    pub user: User,
}

// 用户列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct UserListResponse {
    pub items: Vec<User>,
    pub pagination: PaginationInfo,
}

// 新建用户响应，附带一次性的临时密码
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct CreatedUserResponse {
    pub user: User,
    pub temporary_password: String,
}

// 教师详情
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct TeacherDetailResponse {
    pub user: User,
    pub assignments: Vec<TeacherAssignmentDetail>,
}

// 学生列表项，附带当前班级
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct StudentListItem {
    pub user: User,
    pub class_section: Option<ClassSection>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct StudentListResponse {
    pub items: Vec<StudentListItem>,
    pub pagination: PaginationInfo,
}

// 学生详情
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct StudentDetailResponse {
    pub user: User,
    pub enrollments: Vec<EnrollmentDetail>,
}
