//! 班级实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "class_sections")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    pub year_module: String,
    pub shift: String,
    pub label: String,
    pub modality: String,
    pub room: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Course,
    #[sea_orm(has_many = "super::enrollments::Entity")]
    Enrollments,
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::enrollments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enrollments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_class_section(
        self,
        course_name: Option<String>,
    ) -> crate::models::class_sections::entities::ClassSection {
        use crate::models::class_sections::entities::{ClassSection, Modality, Shift, YearModule};

        ClassSection {
            id: self.id,
            course_id: self.course_id,
            course_name,
            year_module: self.year_module.parse().unwrap_or(YearModule::Year1),
            shift: self.shift.parse().unwrap_or(Shift::Morning),
            label: self.label,
            modality: self.modality.parse().unwrap_or(Modality::Epi),
            room: self.room,
        }
    }
}
