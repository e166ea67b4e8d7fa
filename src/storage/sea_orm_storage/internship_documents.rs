//! 实习文档存储操作

use std::collections::HashMap;

use super::{SeaOrmStorage, db_error};
use crate::entity::internship_documents::{ActiveModel, Column, Entity as InternshipDocuments};
use crate::entity::internships::{Column as InternshipColumn, Entity as Internships};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{CeepSystemError, Result};
use crate::models::{
    dashboard::responses::{PendingDocument, StatusCount},
    internships::entities::{DocumentStatus, DocumentType, InternshipDocument},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

fn encode_form_data(value: &serde_json::Value) -> Result<String> {
    serde_json::to_string(value)
        .map_err(|e| CeepSystemError::serialization(format!("表单内容序列化失败: {e}")))
}

impl SeaOrmStorage {
    /// 创建草稿文档，同一实习的同类文档只能有一份
    pub async fn create_internship_document_impl(
        &self,
        internship_id: i64,
        document_type: DocumentType,
        form_data: serde_json::Value,
        is_shared: bool,
    ) -> Result<InternshipDocument> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            internship_id: Set(internship_id),
            document_type: Set(document_type.to_string()),
            form_data: Set(encode_form_data(&form_data)?),
            attachment_token: Set(None),
            supervisor_pdf_token: Set(None),
            status: Set(DocumentStatus::Draft.to_string()),
            student_signed_at: Set(None),
            advisor_signed_at: Set(None),
            leadership_signed_at: Set(None),
            is_shared: Set(is_shared),
            return_reason: Set(None),
            version: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| db_error("创建实习文档失败", e))?;

        Ok(result.into_document())
    }

    pub async fn get_internship_document_impl(&self, id: i64) -> Result<Option<InternshipDocument>> {
        let result = InternshipDocuments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询实习文档失败", e))?;

        Ok(result.map(|m| m.into_document()))
    }

    pub async fn list_internship_documents_impl(
        &self,
        internship_id: i64,
    ) -> Result<Vec<InternshipDocument>> {
        let result = InternshipDocuments::find()
            .filter(Column::InternshipId.eq(internship_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| db_error("查询实习文档列表失败", e))?;

        Ok(result.into_iter().map(|m| m.into_document()).collect())
    }

    /// 条件写入：仅当数据库中的版本仍为 `document.version` 时更新
    ///
    /// `document` 由读取到的副本修改而来，写入覆盖所有可变列。
    /// 读取之后有任何其他写入（签名、退回、上传、表单修改）都会让版本前进，
    /// 此时返回 None，由调用方报告冲突。
    pub async fn update_document_if_unchanged_impl(
        &self,
        document: &InternshipDocument,
    ) -> Result<Option<InternshipDocument>> {
        let model = ActiveModel {
            form_data: Set(encode_form_data(&document.form_data)?),
            attachment_token: Set(document.attachment_token.clone()),
            supervisor_pdf_token: Set(document.supervisor_pdf_token.clone()),
            status: Set(document.status.to_string()),
            student_signed_at: Set(document.student_signed_at.map(|t| t.timestamp())),
            advisor_signed_at: Set(document.advisor_signed_at.map(|t| t.timestamp())),
            leadership_signed_at: Set(document.leadership_signed_at.map(|t| t.timestamp())),
            is_shared: Set(document.is_shared),
            return_reason: Set(document.return_reason.clone()),
            version: Set(document.version + 1),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = InternshipDocuments::update_many()
            .set(model)
            .filter(Column::Id.eq(document.id))
            .filter(Column::Version.eq(document.version))
            .exec(&self.db)
            .await
            .map_err(|e| db_error("更新实习文档失败", e))?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.get_internship_document_impl(document.id).await
    }

    /// 某状态的文档，附带学生信息；student_ids 为 Some 时限定学生范围
    pub async fn list_documents_by_status_impl(
        &self,
        status: DocumentStatus,
        student_ids: Option<Vec<i64>>,
    ) -> Result<Vec<PendingDocument>> {
        let mut internship_select = Internships::find();
        if let Some(ids) = student_ids {
            internship_select = internship_select.filter(InternshipColumn::StudentId.is_in(ids));
        }
        let internships: HashMap<i64, i64> = internship_select
            .all(&self.db)
            .await
            .map_err(|e| db_error("查询实习档案失败", e))?
            .into_iter()
            .map(|m| (m.id, m.student_id))
            .collect();

        if internships.is_empty() {
            return Ok(Vec::new());
        }

        let documents = InternshipDocuments::find()
            .filter(Column::Status.eq(status.to_string()))
            .filter(Column::InternshipId.is_in(internships.keys().copied()))
            .order_by_asc(Column::UpdatedAt)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| db_error("查询待处理文档失败", e))?;

        let mut student_ids: Vec<i64> = documents
            .iter()
            .filter_map(|d| internships.get(&d.internship_id).copied())
            .collect();
        student_ids.sort_unstable();
        student_ids.dedup();

        let names: HashMap<i64, String> = if student_ids.is_empty() {
            HashMap::new()
        } else {
            Users::find()
                .filter(UserColumn::Id.is_in(student_ids))
                .all(&self.db)
                .await
                .map_err(|e| db_error("查询学生失败", e))?
                .into_iter()
                .map(|u| (u.id, format!("{} {}", u.first_name, u.last_name).trim().to_string()))
                .collect()
        };

        Ok(documents
            .into_iter()
            .filter_map(|d| {
                let student_id = internships.get(&d.internship_id).copied()?;
                Some(PendingDocument {
                    student_name: names.get(&student_id).cloned().unwrap_or_default(),
                    student_id,
                    document: d.into_document(),
                })
            })
            .collect())
    }

    /// 按状态统计文档数量
    pub async fn count_documents_by_status_impl(&self) -> Result<Vec<StatusCount>> {
        let mut counts = Vec::with_capacity(DocumentStatus::ALL.len());
        for status in DocumentStatus::ALL {
            let count = InternshipDocuments::find()
                .filter(Column::Status.eq(status.to_string()))
                .count(&self.db)
                .await
                .map_err(|e| db_error("统计文档数量失败", e))?;
            counts.push(StatusCount {
                status: *status,
                count,
            });
        }
        Ok(counts)
    }
}
