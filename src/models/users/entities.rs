use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

define_string_enum! {
    #[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
    pub enum UserRole ("用户角色") {
        Admin => ("admin", "Administrador"),
        Teacher => ("teacher", "Professor"),
        Student => ("student", "Aluno"),
        Staff => ("staff", "Funcionário"),
        Leadership => ("leadership", "Direção"),
    }
}

impl UserRole {
    pub fn admin_roles() -> &'static [&'static UserRole] {
        &[&Self::Admin]
    }
    pub fn teacher_roles() -> &'static [&'static UserRole] {
        &[&Self::Teacher]
    }
    pub fn student_roles() -> &'static [&'static UserRole] {
        &[&Self::Student]
    }
    /// 可以建立和维护实习档案的角色
    pub fn internship_manager_roles() -> &'static [&'static UserRole] {
        &[&Self::Admin, &Self::Staff, &Self::Leadership]
    }

    /// 登录后前端跳转的仪表盘路径
    pub fn dashboard_path(&self) -> &'static str {
        match self {
            UserRole::Admin => "/dashboard/admin",
            UserRole::Teacher => "/dashboard/teacher",
            UserRole::Student => "/dashboard/student",
            UserRole::Staff => "/dashboard/staff",
            UserRole::Leadership => "/dashboard/leadership",
        }
    }
}

define_string_enum! {
    #[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
    pub enum UserStatus ("用户状态") {
        Active => ("active", "Ativo"),
        Inactive => ("inactive", "Inativo"),
        Suspended => ("suspended", "Suspenso"),
    }
}

define_string_enum! {
    /// 专业方向（轴）
    #[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
    pub enum Eixo ("专业方向") {
        Saude => ("saude", "Saúde"),
        Gestao => ("gestao", "Gestão"),
    }
}

impl Default for Eixo {
    fn default() -> Self {
        Eixo::Gestao
    }
}

// 地址
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct Address {
    pub street: Option<String>,
    pub number: Option<String>,
    pub district: Option<String>,
    pub city: Option<String>,
    pub zip_code: Option<String>,
}

// 个人资料，管理员登记各类用户时共用
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct PersonalData {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub birth_city: Option<String>,
    #[serde(default)]
    pub cpf: Option<String>,
    #[serde(default)]
    pub rg: Option<String>,
    #[serde(default)]
    pub rg_issuer: Option<String>,
    #[serde(default)]
    pub rg_issued_at: Option<NaiveDate>,
    #[serde(default)]
    pub father_name: Option<String>,
    #[serde(default)]
    pub mother_name: Option<String>,
    #[serde(default)]
    pub guardian_name: Option<String>,
    #[serde(default)]
    pub address: Address,
    #[serde(default)]
    pub phone: Option<String>,
}

impl PersonalData {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

// 用户实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub enrollment_number: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    #[ts(skip)]
    pub password_hash: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub eixo: Option<Eixo>,
    #[serde(flatten)]
    #[ts(flatten)]
    pub personal: PersonalData,
    pub must_change_password: bool,
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    pub fn full_name(&self) -> String {
        self.personal.full_name()
    }

    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }

    /// 签发访问令牌和刷新令牌
    pub fn generate_token_pair(
        &self,
        access_ttl: chrono::TimeDelta,
        refresh_ttl: chrono::TimeDelta,
    ) -> crate::errors::Result<crate::utils::jwt::TokenPair> {
        crate::utils::jwt::JwtUtils::generate_token_pair(
            self.id,
            self.role.as_str(),
            access_ttl,
            refresh_ttl,
        )
        .map_err(|e| crate::errors::CeepSystemError::authentication(format!("生成 token 对失败: {e}")))
    }

    pub fn generate_access_token(&self, ttl: chrono::TimeDelta) -> crate::errors::Result<String> {
        use crate::utils::jwt::{JwtUtils, TokenKind};
        JwtUtils::issue(self.id, self.role.as_str(), TokenKind::Access, ttl)
            .map_err(|e| crate::errors::CeepSystemError::authentication(format!("生成 access token 失败: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip_and_label() {
        for role in UserRole::ALL {
            assert_eq!(role.as_str().parse::<UserRole>().unwrap(), *role);
        }
        assert_eq!(UserRole::Leadership.label(), "Direção");
        assert!("director".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_role_deserialize_error_message() {
        let err = serde_json::from_str::<UserRole>("\"director\"").unwrap_err();
        assert!(err.to_string().contains("无效的用户角色"));
    }

    #[test]
    fn test_every_role_has_dashboard() {
        for role in UserRole::ALL {
            assert!(role.dashboard_path().starts_with("/dashboard/"));
        }
    }

    #[test]
    fn test_full_name_trims() {
        let personal = PersonalData {
            first_name: "Maria".into(),
            last_name: "".into(),
            ..Default::default()
        };
        assert_eq!(personal.full_name(), "Maria");
    }
}
