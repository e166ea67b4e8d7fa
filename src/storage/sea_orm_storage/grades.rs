//! 成绩存储操作

use super::{SeaOrmStorage, db_error};
use crate::entity::grades::{ActiveModel, Column, Entity as Grades};
use crate::errors::Result;
use crate::models::grades::entities::Grade;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

fn fill_marks(model: &mut ActiveModel, grade: &Grade, now: i64) {
    model.mark_1 = Set(grade.mark_1);
    model.mark_2 = Set(grade.mark_2);
    model.mark_3 = Set(grade.mark_3);
    model.remedial_mark = Set(grade.remedial_mark);
    model.final_average = Set(grade.final_average);
    model.final_status = Set(grade.final_status.to_string());
    model.updated_by = Set(grade.updated_by);
    model.updated_at = Set(now);
}

impl SeaOrmStorage {
    pub async fn get_grade_impl(
        &self,
        student_id: i64,
        subject_id: i64,
        class_section_id: i64,
    ) -> Result<Option<Grade>> {
        let result = Grades::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::SubjectId.eq(subject_id))
            .filter(Column::ClassSectionId.eq(class_section_id))
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询成绩失败", e))?;

        Ok(result.map(|m| m.into_grade()))
    }

    /// 按 (学生, 科目, 班级) 插入或更新成绩
    pub async fn save_grade_impl(&self, grade: Grade) -> Result<Grade> {
        let now = chrono::Utc::now().timestamp();

        let existing = Grades::find()
            .filter(Column::StudentId.eq(grade.student_id))
            .filter(Column::SubjectId.eq(grade.subject_id))
            .filter(Column::ClassSectionId.eq(grade.class_section_id))
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询成绩失败", e))?;

        let result = match existing {
            Some(model) => {
                let mut active: ActiveModel = model.into();
                fill_marks(&mut active, &grade, now);
                active
                    .update(&self.db)
                    .await
                    .map_err(|e| db_error("更新成绩失败", e))?
            }
            None => {
                let mut active = ActiveModel {
                    student_id: Set(grade.student_id),
                    subject_id: Set(grade.subject_id),
                    class_section_id: Set(grade.class_section_id),
                    ..Default::default()
                };
                fill_marks(&mut active, &grade, now);
                active
                    .insert(&self.db)
                    .await
                    .map_err(|e| db_error("创建成绩失败", e))?
            }
        };

        Ok(result.into_grade())
    }

    /// 某班级某科目的全部成绩
    pub async fn list_grades_for_section_subject_impl(
        &self,
        subject_id: i64,
        class_section_id: i64,
    ) -> Result<Vec<Grade>> {
        let result = Grades::find()
            .filter(Column::SubjectId.eq(subject_id))
            .filter(Column::ClassSectionId.eq(class_section_id))
            .order_by_asc(Column::StudentId)
            .all(&self.db)
            .await
            .map_err(|e| db_error("查询成绩列表失败", e))?;

        Ok(result.into_iter().map(|m| m.into_grade()).collect())
    }

    pub async fn list_student_grades_impl(&self, student_id: i64) -> Result<Vec<Grade>> {
        let result = Grades::find()
            .filter(Column::StudentId.eq(student_id))
            .order_by_asc(Column::SubjectId)
            .all(&self.db)
            .await
            .map_err(|e| db_error("查询学生成绩失败", e))?;

        Ok(result.into_iter().map(|m| m.into_grade()).collect())
    }
}
