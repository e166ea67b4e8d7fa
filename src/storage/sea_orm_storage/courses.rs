//! 课程存储操作

use super::{SeaOrmStorage, db_error};
use crate::entity::courses::{ActiveModel, Column, Entity as Courses};
use crate::errors::Result;
use crate::models::{courses::entities::Course, users::entities::Eixo};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建课程
    pub async fn create_course_impl(&self, name: &str, eixo: Eixo) -> Result<Course> {
        let model = ActiveModel {
            name: Set(name.trim().to_string()),
            eixo: Set(eixo.to_string()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| db_error("创建课程失败", e))?;

        Ok(result.into_course())
    }

    pub async fn get_course_by_id_impl(&self, id: i64) -> Result<Option<Course>> {
        let result = Courses::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询课程失败", e))?;

        Ok(result.map(|m| m.into_course()))
    }

    pub async fn list_courses_impl(&self) -> Result<Vec<Course>> {
        let result = Courses::find()
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| db_error("查询课程列表失败", e))?;

        Ok(result.into_iter().map(|m| m.into_course()).collect())
    }

    /// 按名称创建或更新方向
    pub async fn upsert_course_impl(&self, name: &str, eixo: Eixo) -> Result<Course> {
        let existing = Courses::find()
            .filter(Column::Name.eq(name.trim()))
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询课程失败", e))?;

        match existing {
            Some(model) if model.eixo == eixo.as_str() => Ok(model.into_course()),
            Some(model) => {
                let mut active: ActiveModel = model.into();
                active.eixo = Set(eixo.to_string());
                let result = active
                    .update(&self.db)
                    .await
                    .map_err(|e| db_error("更新课程失败", e))?;
                Ok(result.into_course())
            }
            None => self.create_course_impl(name, eixo).await,
        }
    }

    pub async fn count_courses_impl(&self) -> Result<u64> {
        Courses::find()
            .count(&self.db)
            .await
            .map_err(|e| db_error("统计课程数量失败", e))
    }
}
