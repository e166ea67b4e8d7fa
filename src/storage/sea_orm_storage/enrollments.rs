//! 学生注册存储操作

use std::collections::HashMap;

use super::{SeaOrmStorage, db_error};
use crate::entity::class_sections::{Column as SectionColumn, Entity as ClassSections};
use crate::entity::courses::{Column as CourseColumn, Entity as Courses};
use crate::entity::enrollments::{ActiveModel, Column, Entity as Enrollments, Model};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::Result;
use crate::models::{
    class_sections::entities::ClassSection,
    enrollments::{
        entities::{Enrollment, EnrollmentDetail, academic_term_for},
        requests::SetEnrollment,
    },
    users::entities::{Eixo, User},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

/// 每个学生只保留 ID 最大的注册
fn latest_per_student(models: Vec<Model>) -> Vec<Model> {
    let mut latest: HashMap<i64, Model> = HashMap::new();
    for model in models {
        match latest.get(&model.student_id) {
            Some(current) if current.id >= model.id => {}
            _ => {
                latest.insert(model.student_id, model);
            }
        }
    }
    let mut result: Vec<Model> = latest.into_values().collect();
    result.sort_by_key(|m| m.student_id);
    result
}

impl SeaOrmStorage {
    /// 设置学生班级：已有注册则更新，多余的注册删除，保证只有一条
    pub async fn set_student_enrollment_impl(&self, enrollment: SetEnrollment) -> Result<Enrollment> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| db_error("开启事务失败", e))?;

        let existing = Enrollments::find()
            .filter(Column::StudentId.eq(enrollment.student_id))
            .order_by_desc(Column::Id)
            .all(&txn)
            .await
            .map_err(|e| db_error("查询学生注册失败", e))?;

        let term = academic_term_for(enrollment.enrolled_on);
        let mut existing = existing.into_iter();

        let result = match existing.next() {
            Some(current) => {
                let stale: Vec<i64> = existing.map(|m| m.id).collect();
                if !stale.is_empty() {
                    Enrollments::delete_many()
                        .filter(Column::Id.is_in(stale))
                        .exec(&txn)
                        .await
                        .map_err(|e| db_error("清理学生注册失败", e))?;
                }

                if current.class_section_id == enrollment.class_section_id {
                    current
                } else {
                    let mut active: ActiveModel = current.into();
                    active.class_section_id = Set(enrollment.class_section_id);
                    active.enrolled_on = Set(enrollment.enrolled_on);
                    active.academic_term = Set(term);
                    active
                        .update(&txn)
                        .await
                        .map_err(|e| db_error("更新学生注册失败", e))?
                }
            }
            None => ActiveModel {
                student_id: Set(enrollment.student_id),
                class_section_id: Set(enrollment.class_section_id),
                enrolled_on: Set(enrollment.enrolled_on),
                academic_term: Set(term),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(|e| db_error("创建学生注册失败", e))?,
        };

        txn.commit()
            .await
            .map_err(|e| db_error("提交事务失败", e))?;

        Ok(result.into_enrollment())
    }

    /// 学生的全部注册，附带班级信息
    pub async fn list_student_enrollments_impl(&self, student_id: i64) -> Result<Vec<EnrollmentDetail>> {
        let models = Enrollments::find()
            .filter(Column::StudentId.eq(student_id))
            .order_by_desc(Column::EnrolledOn)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| db_error("查询学生注册失败", e))?;

        let section_ids: Vec<i64> = models.iter().map(|m| m.class_section_id).collect();
        let sections: HashMap<i64, ClassSection> = self
            .load_sections(section_ids)
            .await?
            .into_iter()
            .map(|s| (s.id, s))
            .collect();

        Ok(models
            .into_iter()
            .filter_map(|m| {
                let section = sections.get(&m.class_section_id).cloned()?;
                Some(EnrollmentDetail {
                    enrollment: m.into_enrollment(),
                    class_section: section,
                })
            })
            .collect())
    }

    async fn load_sections(&self, ids: Vec<i64>) -> Result<Vec<ClassSection>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = ClassSections::find()
            .filter(SectionColumn::Id.is_in(ids))
            .all(&self.db)
            .await
            .map_err(|e| db_error("查询班级失败", e))?;
        self.attach_course_names(models).await
    }

    /// 一组学生的当前班级
    pub async fn get_current_sections_impl(
        &self,
        student_ids: &[i64],
    ) -> Result<Vec<(i64, ClassSection)>> {
        if student_ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = Enrollments::find()
            .filter(Column::StudentId.is_in(student_ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(|e| db_error("查询学生注册失败", e))?;
        let current = latest_per_student(models);

        let section_ids: Vec<i64> = current.iter().map(|m| m.class_section_id).collect();
        let sections: HashMap<i64, ClassSection> = self
            .load_sections(section_ids)
            .await?
            .into_iter()
            .map(|s| (s.id, s))
            .collect();

        Ok(current
            .into_iter()
            .filter_map(|m| {
                sections
                    .get(&m.class_section_id)
                    .cloned()
                    .map(|s| (m.student_id, s))
            })
            .collect())
    }

    /// 班级学生，按姓名排序
    pub async fn list_section_students_impl(&self, class_section_id: i64) -> Result<Vec<User>> {
        let student_ids: Vec<i64> = Enrollments::find()
            .filter(Column::ClassSectionId.eq(class_section_id))
            .all(&self.db)
            .await
            .map_err(|e| db_error("查询班级学生失败", e))?
            .into_iter()
            .map(|m| m.student_id)
            .collect();

        if student_ids.is_empty() {
            return Ok(Vec::new());
        }

        let users = Users::find()
            .filter(UserColumn::Id.is_in(student_ids))
            .order_by_asc(UserColumn::FirstName)
            .order_by_asc(UserColumn::LastName)
            .all(&self.db)
            .await
            .map_err(|e| db_error("查询学生失败", e))?;

        Ok(users.into_iter().map(|m| m.into_user()).collect())
    }

    pub async fn is_student_enrolled_impl(
        &self,
        student_id: i64,
        class_section_id: i64,
    ) -> Result<bool> {
        let count = Enrollments::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::ClassSectionId.eq(class_section_id))
            .count(&self.db)
            .await
            .map_err(|e| db_error("查询学生注册失败", e))?;

        Ok(count > 0)
    }

    /// 课程属于某方向的全部学生
    pub async fn list_student_ids_by_eixo_impl(&self, eixo: Eixo) -> Result<Vec<i64>> {
        let course_ids: Vec<i64> = Courses::find()
            .filter(CourseColumn::Eixo.eq(eixo.to_string()))
            .all(&self.db)
            .await
            .map_err(|e| db_error("查询课程失败", e))?
            .into_iter()
            .map(|c| c.id)
            .collect();

        if course_ids.is_empty() {
            return Ok(Vec::new());
        }

        let section_ids: Vec<i64> = ClassSections::find()
            .filter(SectionColumn::CourseId.is_in(course_ids))
            .all(&self.db)
            .await
            .map_err(|e| db_error("查询班级失败", e))?
            .into_iter()
            .map(|s| s.id)
            .collect();

        if section_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut student_ids: Vec<i64> = Enrollments::find()
            .filter(Column::ClassSectionId.is_in(section_ids))
            .all(&self.db)
            .await
            .map_err(|e| db_error("查询学生注册失败", e))?
            .into_iter()
            .map(|m| m.student_id)
            .collect();
        student_ids.sort_unstable();
        student_ids.dedup();

        Ok(student_ids)
    }

    /// 学生当前课程的方向
    pub async fn get_student_eixo_impl(&self, student_id: i64) -> Result<Option<Eixo>> {
        let current = self.get_current_sections_impl(&[student_id]).await?;
        let Some((_, section)) = current.into_iter().next() else {
            return Ok(None);
        };

        let course = Courses::find_by_id(section.course_id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询课程失败", e))?;

        Ok(course.map(|c| c.into_course().eixo))
    }
}
