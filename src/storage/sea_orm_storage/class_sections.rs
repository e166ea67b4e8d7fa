//! 班级存储操作

use std::collections::HashMap;

use super::{SeaOrmStorage, db_error};
use crate::entity::class_sections::{ActiveModel, Column, Entity as ClassSections, Model};
use crate::entity::courses::{Column as CourseColumn, Entity as Courses};
use crate::errors::Result;
use crate::models::class_sections::{
    entities::ClassSection,
    requests::{ClassSectionListQuery, NewClassSection},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, Set,
};

/// 班级排序：课程、年级/模块、班次、标签
pub(super) fn sort_sections(sections: &mut [ClassSection]) {
    sections.sort_by(|a, b| {
        a.course_name
            .cmp(&b.course_name)
            .then(a.year_module.ordinal().cmp(&b.year_module.ordinal()))
            .then(a.shift.ordinal().cmp(&b.shift.ordinal()))
            .then(a.label.cmp(&b.label))
            .then(a.id.cmp(&b.id))
    });
}

impl SeaOrmStorage {
    /// 为一组班级模型补全课程名称
    pub(super) async fn attach_course_names(&self, models: Vec<Model>) -> Result<Vec<ClassSection>> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let mut course_ids: Vec<i64> = models.iter().map(|m| m.course_id).collect();
        course_ids.sort_unstable();
        course_ids.dedup();

        let names: HashMap<i64, String> = Courses::find()
            .filter(CourseColumn::Id.is_in(course_ids))
            .all(&self.db)
            .await
            .map_err(|e| db_error("查询课程失败", e))?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();

        Ok(models
            .into_iter()
            .map(|m| {
                let name = names.get(&m.course_id).cloned();
                m.into_class_section(name)
            })
            .collect())
    }

    /// 创建班级
    pub async fn create_class_section_impl(&self, section: NewClassSection) -> Result<ClassSection> {
        let model = ActiveModel {
            course_id: Set(section.course_id),
            year_module: Set(section.year_module.to_string()),
            shift: Set(section.shift.to_string()),
            label: Set(section.label.trim().to_string()),
            modality: Set(section.modality.to_string()),
            room: Set(section.room),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| db_error("创建班级失败", e))?;

        self.attach_course_names(vec![result])
            .await?
            .pop()
            .ok_or_else(|| crate::errors::CeepSystemError::database_operation("创建班级后读取失败"))
    }

    pub async fn get_class_section_by_id_impl(&self, id: i64) -> Result<Option<ClassSection>> {
        let result = ClassSections::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询班级失败", e))?;

        match result {
            Some(model) => Ok(self.attach_course_names(vec![model]).await?.pop()),
            None => Ok(None),
        }
    }

    /// 按筛选条件列出班级
    pub async fn list_class_sections_impl(
        &self,
        query: ClassSectionListQuery,
    ) -> Result<Vec<ClassSection>> {
        let mut select = ClassSections::find();

        if let Some(course_id) = query.course_id {
            select = select.filter(Column::CourseId.eq(course_id));
        }
        if let Some(year_module) = query.year_module {
            select = select.filter(Column::YearModule.eq(year_module.to_string()));
        }
        if let Some(shift) = query.shift {
            select = select.filter(Column::Shift.eq(shift.to_string()));
        }
        if let Some(modality) = query.modality {
            select = select.filter(Column::Modality.eq(modality.to_string()));
        }

        let models = select
            .all(&self.db)
            .await
            .map_err(|e| db_error("查询班级列表失败", e))?;

        let mut sections = self.attach_course_names(models).await?;
        sort_sections(&mut sections);
        Ok(sections)
    }

    /// 按 (课程, 年级/模块, 班次, 标签, 模式) 创建或更新教室
    pub async fn upsert_class_section_impl(&self, section: NewClassSection) -> Result<ClassSection> {
        let existing = ClassSections::find()
            .filter(
                Condition::all()
                    .add(Column::CourseId.eq(section.course_id))
                    .add(Column::YearModule.eq(section.year_module.to_string()))
                    .add(Column::Shift.eq(section.shift.to_string()))
                    .add(Column::Label.eq(section.label.trim()))
                    .add(Column::Modality.eq(section.modality.to_string())),
            )
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询班级失败", e))?;

        let Some(model) = existing else {
            return self.create_class_section_impl(section).await;
        };

        let model = if model.room != section.room && section.room.is_some() {
            let mut active: ActiveModel = model.into();
            active.room = Set(section.room);
            active
                .update(&self.db)
                .await
                .map_err(|e| db_error("更新班级失败", e))?
        } else {
            model
        };

        self.attach_course_names(vec![model])
            .await?
            .pop()
            .ok_or_else(|| crate::errors::CeepSystemError::database_operation("读取班级失败"))
    }

    pub async fn count_class_sections_impl(&self) -> Result<u64> {
        ClassSections::find()
            .count(&self.db)
            .await
            .map_err(|e| db_error("统计班级数量失败", e))
    }
}
