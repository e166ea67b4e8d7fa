//! 用户实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub enrollment_number: String,
    pub password_hash: String,
    pub role: String,
    pub status: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub eixo: Option<String>,
    pub birth_date: Option<Date>,
    pub birth_city: Option<String>,
    #[sea_orm(unique)]
    pub cpf: Option<String>,
    #[sea_orm(unique)]
    pub rg: Option<String>,
    pub rg_issuer: Option<String>,
    pub rg_issued_at: Option<Date>,
    pub father_name: Option<String>,
    pub mother_name: Option<String>,
    pub guardian_name: Option<String>,
    pub address_street: Option<String>,
    pub address_number: Option<String>,
    pub address_district: Option<String>,
    pub address_city: Option<String>,
    pub address_zip_code: Option<String>,
    pub phone: Option<String>,
    pub must_change_password: bool,
    pub last_login: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::enrollments::Entity")]
    Enrollments,
    #[sea_orm(has_many = "super::teacher_assignments::Entity")]
    TeacherAssignments,
    #[sea_orm(has_many = "super::files::Entity")]
    Files,
}

impl Related<super::enrollments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enrollments.def()
    }
}

impl Related<super::teacher_assignments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TeacherAssignments.def()
    }
}

impl Related<super::files::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Files.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_user(self) -> crate::models::users::entities::User {
        use crate::models::users::entities::{Address, PersonalData, User, UserRole, UserStatus};

        User {
            id: self.id,
            username: self.username,
            enrollment_number: self.enrollment_number,
            password_hash: self.password_hash,
            role: self.role.parse::<UserRole>().unwrap_or(UserRole::Student),
            status: self
                .status
                .parse::<UserStatus>()
                .unwrap_or(UserStatus::Active),
            eixo: self.eixo.and_then(|e| e.parse().ok()),
            personal: PersonalData {
                first_name: self.first_name,
                last_name: self.last_name,
                email: self.email,
                birth_date: self.birth_date,
                birth_city: self.birth_city,
                cpf: self.cpf,
                rg: self.rg,
                rg_issuer: self.rg_issuer,
                rg_issued_at: self.rg_issued_at,
                father_name: self.father_name,
                mother_name: self.mother_name,
                guardian_name: self.guardian_name,
                address: Address {
                    street: self.address_street,
                    number: self.address_number,
                    district: self.address_district,
                    city: self.address_city,
                    zip_code: self.address_zip_code,
                },
                phone: self.phone,
            },
            must_change_password: self.must_change_password,
            last_login: self.last_login.map(super::from_timestamp),
            created_at: super::from_timestamp(self.created_at),
            updated_at: super::from_timestamp(self.updated_at),
        }
    }
}
