//! 实习档案存储操作

use std::collections::HashMap;

use super::{SeaOrmStorage, db_error, normalize_page};
use crate::entity::internships::{ActiveModel, Column, Entity as Internships, Model};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::Result;
use crate::models::{
    PaginationInfo,
    internships::{
        entities::{Internship, InternshipStatus},
        requests::{CreateInternshipRequest, InternshipListQuery, UpdateInternshipRequest},
        responses::{InternshipDetail, InternshipListResponse},
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 补全学生和指导教师姓名
    async fn attach_internship_names(&self, models: Vec<Model>) -> Result<Vec<InternshipDetail>> {
        let mut user_ids: Vec<i64> = models
            .iter()
            .flat_map(|m| std::iter::once(m.student_id).chain(m.advisor_id))
            .collect();
        user_ids.sort_unstable();
        user_ids.dedup();

        let names: HashMap<i64, String> = if user_ids.is_empty() {
            HashMap::new()
        } else {
            Users::find()
                .filter(UserColumn::Id.is_in(user_ids))
                .all(&self.db)
                .await
                .map_err(|e| db_error("查询用户失败", e))?
                .into_iter()
                .map(|u| (u.id, format!("{} {}", u.first_name, u.last_name).trim().to_string()))
                .collect()
        };

        Ok(models
            .into_iter()
            .map(|m| {
                let student_name = names.get(&m.student_id).cloned().unwrap_or_default();
                let advisor_name = m.advisor_id.and_then(|id| names.get(&id).cloned());
                InternshipDetail {
                    internship: m.into_internship(),
                    student_name,
                    advisor_name,
                }
            })
            .collect())
    }

    /// 创建实习档案，每名学生只能有一份
    pub async fn create_internship_impl(&self, req: CreateInternshipRequest) -> Result<Internship> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            student_id: Set(req.student_id),
            advisor_id: Set(req.advisor_id),
            supervisor_name: Set(req.supervisor_name.trim().to_string()),
            supervisor_company: Set(req.supervisor_company.trim().to_string()),
            supervisor_position: Set(req.supervisor_position.trim().to_string()),
            supervisor_email: Set(req.supervisor_email),
            start_date: Set(req.start_date),
            end_date: Set(req.end_date),
            overall_status: Set(InternshipStatus::InProgress.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| db_error("创建实习档案失败", e))?;

        Ok(result.into_internship())
    }

    pub async fn update_internship_impl(
        &self,
        id: i64,
        req: UpdateInternshipRequest,
    ) -> Result<Option<Internship>> {
        let existing = Internships::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询实习档案失败", e))?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        model.advisor_id = Set(req.advisor_id);
        model.supervisor_name = Set(req.supervisor_name.trim().to_string());
        model.supervisor_company = Set(req.supervisor_company.trim().to_string());
        model.supervisor_position = Set(req.supervisor_position.trim().to_string());
        model.supervisor_email = Set(req.supervisor_email);
        model.start_date = Set(req.start_date);
        model.end_date = Set(req.end_date);
        if let Some(status) = req.overall_status {
            model.overall_status = Set(status.to_string());
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| db_error("更新实习档案失败", e))?;

        Ok(Some(result.into_internship()))
    }

    pub async fn get_internship_by_id_impl(&self, id: i64) -> Result<Option<Internship>> {
        let result = Internships::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询实习档案失败", e))?;

        Ok(result.map(|m| m.into_internship()))
    }

    pub async fn get_internship_by_student_impl(&self, student_id: i64) -> Result<Option<Internship>> {
        let result = Internships::find()
            .filter(Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询实习档案失败", e))?;

        Ok(result.map(|m| m.into_internship()))
    }

    /// 分页列出实习档案
    pub async fn list_internships_impl(
        &self,
        query: InternshipListQuery,
    ) -> Result<InternshipListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = Internships::find();

        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(advisor_id) = query.advisor_id {
            select = select.filter(Column::AdvisorId.eq(advisor_id));
        }
        if let Some(student_ids) = query.student_ids {
            // 空范围时不返回任何档案
            select = select.filter(Column::StudentId.is_in(student_ids));
        }
        if let Some(status) = query.status {
            select = select.filter(Column::OverallStatus.eq(status.to_string()));
        }

        select = select.order_by_desc(Column::StartDate).order_by_desc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| db_error("查询实习总数失败", e))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| db_error("查询实习页数失败", e))?;
        let models = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| db_error("查询实习列表失败", e))?;

        Ok(InternshipListResponse {
            items: self.attach_internship_names(models).await?,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    pub async fn count_internships_impl(&self) -> Result<u64> {
        Internships::find()
            .count(&self.db)
            .await
            .map_err(|e| db_error("统计实习数量失败", e))
    }
}
