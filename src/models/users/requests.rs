use super::entities::{Eixo, PersonalData, UserRole, UserStatus};
use crate::models::common::PaginationQuery;
use crate::models::teacher_assignments::requests::AssignmentInput;
use serde::Deserialize;
use ts_rs::TS;

// 用户列表查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct UserListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub status: Option<UserStatus>,
    pub search: Option<String>,
}

// 教师创建请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct CreateTeacherRequest {
    #[serde(flatten)]
    #[ts(flatten)]
    pub personal: PersonalData,
    #[serde(default)]
    pub assignments: Vec<AssignmentInput>,
}

// 教师更新请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct UpdateTeacherRequest {
    #[serde(flatten)]
    #[ts(flatten)]
    pub personal: PersonalData,
    pub status: Option<UserStatus>,
    /// 新增的任课
    #[serde(default)]
    pub add_assignments: Vec<AssignmentInput>,
    /// 需要删除的任课 ID
    #[serde(default)]
    pub remove_assignment_ids: Vec<i64>,
}

// 学生创建请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct CreateStudentRequest {
    #[serde(flatten)]
    #[ts(flatten)]
    pub personal: PersonalData,
    pub class_section_id: i64,
}

// 学生更新请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct UpdateStudentRequest {
    #[serde(flatten)]
    #[ts(flatten)]
    pub personal: PersonalData,
    pub status: Option<UserStatus>,
    /// 更换班级时替换原有注册
    pub class_section_id: Option<i64>,
}

define_string_enum! {
    /// 行政人员类别
    #[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
    pub enum StaffKind ("人员类别") {
        Staff => ("staff", "Funcionário"),
        Leadership => ("leadership", "Direção"),
    }
}

impl StaffKind {
    pub fn role(&self) -> UserRole {
        match self {
            StaffKind::Staff => UserRole::Staff,
            StaffKind::Leadership => UserRole::Leadership,
        }
    }

    /// 职员保留专业方向，领导层不区分方向
    pub fn keeps_eixo(&self) -> bool {
        matches!(self, StaffKind::Staff)
    }

    pub fn from_role(role: UserRole) -> Option<Self> {
        match role {
            UserRole::Staff => Some(StaffKind::Staff),
            UserRole::Leadership => Some(StaffKind::Leadership),
            _ => None,
        }
    }
}

// 行政人员创建请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct CreateStaffRequest {
    #[serde(flatten)]
    #[ts(flatten)]
    pub personal: PersonalData,
    pub kind: StaffKind,
    pub eixo: Option<Eixo>,
}

// 行政人员更新请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct UpdateStaffRequest {
    #[serde(flatten)]
    #[ts(flatten)]
    pub personal: PersonalData,
    pub status: Option<UserStatus>,
    pub kind: Option<StaffKind>,
    pub eixo: Option<Eixo>,
}

// 用户列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct UserListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub roles: Vec<UserRole>,
    pub status: Option<UserStatus>,
    pub search: Option<String>,
}

// 新建用户（用于存储层，密码已哈希）
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub enrollment_number: String,
    pub password_hash: String,
    pub role: UserRole,
    pub eixo: Option<Eixo>,
    pub personal: PersonalData,
    pub must_change_password: bool,
}

// 更新用户（用于存储层），None 表示不修改
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub personal: Option<PersonalData>,
    pub status: Option<UserStatus>,
    pub role: Option<UserRole>,
    pub eixo: Option<Option<Eixo>>,
}
