//! 成绩实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "grades")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub subject_id: i64,
    pub class_section_id: i64,
    pub mark_1: Option<f64>,
    pub mark_2: Option<f64>,
    pub mark_3: Option<f64>,
    pub remedial_mark: Option<f64>,
    pub final_average: Option<f64>,
    pub final_status: String,
    pub updated_by: Option<i64>,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::StudentId",
        to = "super::users::Column::Id"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::subjects::Entity",
        from = "Column::SubjectId",
        to = "super::subjects::Column::Id"
    )]
    Subject,
    #[sea_orm(
        belongs_to = "super::class_sections::Entity",
        from = "Column::ClassSectionId",
        to = "super::class_sections::Column::Id"
    )]
    ClassSection,
}

impl Related<super::subjects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subject.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_grade(self) -> crate::models::grades::entities::Grade {
        use crate::models::grades::entities::{Grade, GradeStatus};

        Grade {
            id: self.id,
            student_id: self.student_id,
            subject_id: self.subject_id,
            class_section_id: self.class_section_id,
            mark_1: self.mark_1,
            mark_2: self.mark_2,
            mark_3: self.mark_3,
            remedial_mark: self.remedial_mark,
            final_average: self.final_average,
            final_status: self
                .final_status
                .parse()
                .unwrap_or(GradeStatus::Pending),
            updated_by: self.updated_by,
            updated_at: super::from_timestamp(self.updated_at),
        }
    }
}
