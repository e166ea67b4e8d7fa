//! 任课存储操作

use std::collections::HashMap;

use super::{SeaOrmStorage, db_error};
use crate::entity::courses::{Column as CourseColumn, Entity as Courses};
use crate::entity::subjects::{Column as SubjectColumn, Entity as Subjects};
use crate::entity::teacher_assignments::{ActiveModel, Column, Entity as TeacherAssignments, Model};
use crate::errors::Result;
use crate::models::{
    class_sections::entities::ClassSection,
    teacher_assignments::{
        entities::{TeacherAssignment, TeacherAssignmentDetail},
        requests::AssignmentInput,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    /// 补全科目与课程名称
    async fn attach_assignment_names(&self, models: Vec<Model>) -> Result<Vec<TeacherAssignmentDetail>> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let subject_ids: Vec<i64> = models.iter().map(|m| m.subject_id).collect();
        let course_ids: Vec<i64> = models.iter().map(|m| m.course_id).collect();

        let subjects: HashMap<i64, String> = Subjects::find()
            .filter(SubjectColumn::Id.is_in(subject_ids))
            .all(&self.db)
            .await
            .map_err(|e| db_error("查询科目失败", e))?
            .into_iter()
            .map(|s| (s.id, s.name))
            .collect();

        let courses: HashMap<i64, String> = Courses::find()
            .filter(CourseColumn::Id.is_in(course_ids))
            .all(&self.db)
            .await
            .map_err(|e| db_error("查询课程失败", e))?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();

        let mut details: Vec<TeacherAssignmentDetail> = models
            .into_iter()
            .map(|m| {
                let subject_name = subjects.get(&m.subject_id).cloned().unwrap_or_default();
                let course_name = courses.get(&m.course_id).cloned().unwrap_or_default();
                TeacherAssignmentDetail {
                    assignment: m.into_assignment(),
                    subject_name,
                    course_name,
                }
            })
            .collect();

        details.sort_by(|a, b| {
            a.subject_name
                .cmp(&b.subject_name)
                .then(a.course_name.cmp(&b.course_name))
                .then(
                    a.assignment
                        .year_module
                        .ordinal()
                        .cmp(&b.assignment.year_module.ordinal()),
                )
                .then(a.assignment.id.cmp(&b.assignment.id))
        });
        Ok(details)
    }

    /// 创建任课
    pub async fn create_teacher_assignment_impl(
        &self,
        teacher_id: i64,
        input: AssignmentInput,
    ) -> Result<TeacherAssignment> {
        let model = ActiveModel {
            teacher_id: Set(teacher_id),
            subject_id: Set(input.subject_id),
            course_id: Set(input.course_id),
            year_module: Set(input.year_module.to_string()),
            modality: Set(input.modality.to_string()),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| db_error("创建任课失败", e))?;

        Ok(result.into_assignment())
    }

    /// 删除教师的指定任课，其他教师的任课不受影响
    pub async fn delete_teacher_assignments_impl(&self, teacher_id: i64, ids: &[i64]) -> Result<u64> {
        if ids.is_empty() {
            return Ok(0);
        }

        let result = TeacherAssignments::delete_many()
            .filter(Column::TeacherId.eq(teacher_id))
            .filter(Column::Id.is_in(ids.iter().copied()))
            .exec(&self.db)
            .await
            .map_err(|e| db_error("删除任课失败", e))?;

        Ok(result.rows_affected)
    }

    pub async fn list_teacher_assignments_impl(
        &self,
        teacher_id: i64,
    ) -> Result<Vec<TeacherAssignmentDetail>> {
        let models = TeacherAssignments::find()
            .filter(Column::TeacherId.eq(teacher_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| db_error("查询任课列表失败", e))?;

        self.attach_assignment_names(models).await
    }

    pub async fn list_assignments_by_subject_impl(
        &self,
        subject_id: i64,
    ) -> Result<Vec<TeacherAssignmentDetail>> {
        let models = TeacherAssignments::find()
            .filter(Column::SubjectId.eq(subject_id))
            .order_by_asc(Column::TeacherId)
            .all(&self.db)
            .await
            .map_err(|e| db_error("查询科目任课失败", e))?;

        self.attach_assignment_names(models).await
    }

    pub async fn get_teacher_assignment_impl(
        &self,
        id: i64,
    ) -> Result<Option<TeacherAssignmentDetail>> {
        let model = TeacherAssignments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询任课失败", e))?;

        match model {
            Some(model) => Ok(self.attach_assignment_names(vec![model]).await?.pop()),
            None => Ok(None),
        }
    }

    /// 教师是否有覆盖该班级的任课
    pub async fn teacher_teaches_section_impl(
        &self,
        teacher_id: i64,
        subject_id: i64,
        section: &ClassSection,
    ) -> Result<bool> {
        let count = TeacherAssignments::find()
            .filter(
                Condition::all()
                    .add(Column::TeacherId.eq(teacher_id))
                    .add(Column::SubjectId.eq(subject_id))
                    .add(Column::CourseId.eq(section.course_id))
                    .add(Column::YearModule.eq(section.year_module.to_string()))
                    .add(Column::Modality.eq(section.modality.to_string())),
            )
            .count(&self.db)
            .await
            .map_err(|e| db_error("查询任课失败", e))?;

        Ok(count > 0)
    }
}
