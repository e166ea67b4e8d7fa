//! 实习档案实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "internships")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub student_id: i64,
    pub advisor_id: Option<i64>,
    pub supervisor_name: String,
    pub supervisor_company: String,
    pub supervisor_position: String,
    pub supervisor_email: Option<String>,
    pub start_date: Date,
    pub end_date: Date,
    pub overall_status: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::internship_documents::Entity")]
    Documents,
}

impl Related<super::internship_documents::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Documents.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_internship(self) -> crate::models::internships::entities::Internship {
        use crate::models::internships::entities::{Internship, InternshipStatus};

        Internship {
            id: self.id,
            student_id: self.student_id,
            advisor_id: self.advisor_id,
            supervisor_name: self.supervisor_name,
            supervisor_company: self.supervisor_company,
            supervisor_position: self.supervisor_position,
            supervisor_email: self.supervisor_email,
            start_date: self.start_date,
            end_date: self.end_date,
            overall_status: self
                .overall_status
                .parse()
                .unwrap_or(InternshipStatus::InProgress),
            created_at: super::from_timestamp(self.created_at),
            updated_at: super::from_timestamp(self.updated_at),
        }
    }
}
