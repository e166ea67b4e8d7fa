//! 科目存储操作

use std::collections::HashMap;

use super::{SeaOrmStorage, db_error};
use crate::entity::subject_class_sections::{
    ActiveModel as LinkActiveModel, Column as LinkColumn, Entity as SubjectClassSections,
};
use crate::entity::subjects::{ActiveModel, Column, Entity as Subjects};
use crate::errors::Result;
use crate::models::subjects::{
    entities::{DEFAULT_WORKLOAD_HOURS, Subject},
    requests::UpdateSubjectRequest,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

/// 写入科目与班级的关联，重复的班级 ID 只写一次
async fn insert_links<C: ConnectionTrait>(
    conn: &C,
    subject_id: i64,
    class_section_ids: &[i64],
) -> Result<()> {
    let mut ids = class_section_ids.to_vec();
    ids.sort_unstable();
    ids.dedup();

    for class_section_id in ids {
        LinkActiveModel {
            subject_id: Set(subject_id),
            class_section_id: Set(class_section_id),
        }
        .insert(conn)
        .await
        .map_err(|e| db_error("关联科目班级失败", e))?;
    }
    Ok(())
}

impl SeaOrmStorage {
    /// 创建科目并关联开设班级
    pub async fn create_subject_impl(
        &self,
        name: &str,
        workload_hours: i32,
        class_section_ids: &[i64],
    ) -> Result<Subject> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| db_error("开启事务失败", e))?;

        let model = ActiveModel {
            name: Set(name.trim().to_string()),
            workload_hours: Set(workload_hours),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| db_error("创建科目失败", e))?;

        insert_links(&txn, model.id, class_section_ids).await?;

        txn.commit()
            .await
            .map_err(|e| db_error("提交事务失败", e))?;

        Ok(model.into_subject())
    }

    /// 更新科目；提供 class_section_ids 时整体替换开设班级
    pub async fn update_subject_impl(
        &self,
        id: i64,
        update: UpdateSubjectRequest,
    ) -> Result<Option<Subject>> {
        let existing = Subjects::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询科目失败", e))?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| db_error("开启事务失败", e))?;

        let result = if update.name.is_some() || update.workload_hours.is_some() {
            let mut model: ActiveModel = existing.into();
            if let Some(name) = update.name {
                model.name = Set(name.trim().to_string());
            }
            if let Some(workload_hours) = update.workload_hours {
                model.workload_hours = Set(workload_hours);
            }
            model
                .update(&txn)
                .await
                .map_err(|e| db_error("更新科目失败", e))?
        } else {
            existing
        };

        if let Some(ids) = update.class_section_ids {
            SubjectClassSections::delete_many()
                .filter(LinkColumn::SubjectId.eq(id))
                .exec(&txn)
                .await
                .map_err(|e| db_error("清除科目班级关联失败", e))?;
            insert_links(&txn, id, &ids).await?;
        }

        txn.commit()
            .await
            .map_err(|e| db_error("提交事务失败", e))?;

        Ok(Some(result.into_subject()))
    }

    pub async fn get_subject_by_id_impl(&self, id: i64) -> Result<Option<Subject>> {
        let result = Subjects::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询科目失败", e))?;

        Ok(result.map(|m| m.into_subject()))
    }

    pub async fn list_subjects_impl(&self) -> Result<Vec<Subject>> {
        let result = Subjects::find()
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| db_error("查询科目列表失败", e))?;

        Ok(result.into_iter().map(|m| m.into_subject()).collect())
    }

    /// 按名称获取科目，不存在时以默认学时创建
    pub async fn get_or_create_subject_impl(&self, name: &str) -> Result<Subject> {
        let existing = Subjects::find()
            .filter(Column::Name.eq(name.trim()))
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询科目失败", e))?;

        match existing {
            Some(model) => Ok(model.into_subject()),
            None => {
                self.create_subject_impl(name, DEFAULT_WORKLOAD_HOURS, &[])
                    .await
            }
        }
    }

    pub async fn list_subject_section_ids_impl(&self, subject_id: i64) -> Result<Vec<i64>> {
        let links = SubjectClassSections::find()
            .filter(LinkColumn::SubjectId.eq(subject_id))
            .order_by_asc(LinkColumn::ClassSectionId)
            .all(&self.db)
            .await
            .map_err(|e| db_error("查询科目班级失败", e))?;

        Ok(links.into_iter().map(|l| l.class_section_id).collect())
    }

    /// 一组班级开设的科目，按科目名称排序
    pub async fn list_subjects_for_sections_impl(
        &self,
        section_ids: &[i64],
    ) -> Result<Vec<(i64, Subject)>> {
        if section_ids.is_empty() {
            return Ok(Vec::new());
        }

        let links = SubjectClassSections::find()
            .filter(LinkColumn::ClassSectionId.is_in(section_ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(|e| db_error("查询班级科目失败", e))?;

        let mut subject_ids: Vec<i64> = links.iter().map(|l| l.subject_id).collect();
        subject_ids.sort_unstable();
        subject_ids.dedup();

        let subjects: HashMap<i64, Subject> = Subjects::find()
            .filter(Column::Id.is_in(subject_ids))
            .all(&self.db)
            .await
            .map_err(|e| db_error("查询科目失败", e))?
            .into_iter()
            .map(|m| (m.id, m.into_subject()))
            .collect();

        let mut result: Vec<(i64, Subject)> = links
            .into_iter()
            .filter_map(|l| {
                subjects
                    .get(&l.subject_id)
                    .cloned()
                    .map(|s| (l.class_section_id, s))
            })
            .collect();
        result.sort_by(|a, b| a.1.name.cmp(&b.1.name).then(a.0.cmp(&b.0)));
        Ok(result)
    }
}
