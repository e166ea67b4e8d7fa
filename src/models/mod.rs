#[macro_use]
mod macros;

pub mod auth;
pub mod class_sections;
pub mod common;
pub mod courses;
pub mod dashboard;
pub mod enrollments;
pub mod files;
pub mod grades;
pub mod internships;
pub mod subjects;
pub mod system;
pub mod teacher_assignments;
pub mod users;

pub use common::{ApiResponse, PaginationInfo, PaginationQuery};

/// API 业务错误码
///
/// 按模块分段：1xxx 通用、2xxx 认证、3xxx 用户、4xxx 教务、5xxx 成绩、
/// 6xxx 实习、7xxx 文件、8xxx 系统设置。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success = 0,

    // 通用
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1009,
    RateLimitExceeded = 1029,
    InternalServerError = 1500,

    // 认证
    AuthFailed = 2000,
    PasswordChangeFailed = 2001,
    UserPasswordInvalid = 2002,

    // 用户
    UserNotFound = 3000,
    UserCreationFailed = 3002,
    UserDeleteFailed = 3004,
    UserDocumentInvalid = 3005,
    UserEmailInvalid = 3006,
    UserRoleMismatch = 3007,

    // 教务（课程、班级、科目、任课、注册）
    CourseNotFound = 4000,
    CourseAlreadyExists = 4001,
    ClassSectionNotFound = 4100,
    ClassSectionInvalid = 4101,
    ClassSectionAlreadyExists = 4102,
    ClassOptionTargetInvalid = 4103,
    SubjectNotFound = 4200,
    SubjectInvalid = 4201,
    AssignmentNotFound = 4300,
    StudentNotEnrolled = 4400,

    // 成绩
    GradeInvalid = 5000,
    GradeNotAllowed = 5001,

    // 实习
    InternshipNotFound = 6000,
    InternshipAlreadyExists = 6001,
    InternshipInvalid = 6002,
    DocumentNotFound = 6100,
    DocumentAlreadyExists = 6101,
    DocumentTransitionInvalid = 6102,
    DocumentNotEditable = 6103,
    DocumentAccessDenied = 6104,

    // 文件
    FileNotFound = 7000,
    FileUploadFailed = 7001,
    FileTypeNotAllowed = 7002,
    FileSizeExceeded = 7003,
    MultifileUploadNotAllowed = 7004,

    // 系统设置
    SettingNotFound = 8000,
    SettingInvalid = 8001,
}
