//! 实习文档实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "internship_documents")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub internship_id: i64,
    pub document_type: String,
    #[sea_orm(column_type = "Text")]
    pub form_data: String,
    pub attachment_token: Option<String>,
    pub supervisor_pdf_token: Option<String>,
    pub status: String,
    pub student_signed_at: Option<i64>,
    pub advisor_signed_at: Option<i64>,
    pub leadership_signed_at: Option<i64>,
    pub is_shared: bool,
    #[sea_orm(column_type = "Text", nullable)]
    pub return_reason: Option<String>,
    pub version: i32,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::internships::Entity",
        from = "Column::InternshipId",
        to = "super::internships::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Internship,
}

impl Related<super::internships::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Internship.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 无法识别的类型或状态会记录警告；未知状态按已完成处理，避免重新开放编辑
    pub fn into_document(self) -> crate::models::internships::entities::InternshipDocument {
        use crate::models::internships::entities::{
            DocumentStatus, DocumentType, InternshipDocument,
        };

        let document_type = self.document_type.parse().unwrap_or_else(|_| {
            tracing::warn!(
                "Document {} has unknown type '{}'",
                self.id,
                self.document_type
            );
            DocumentType::CommitmentTerm
        });
        let status = self.status.parse().unwrap_or_else(|_| {
            tracing::warn!("Document {} has unknown status '{}'", self.id, self.status);
            DocumentStatus::Finalized
        });
        let form_data = serde_json::from_str(&self.form_data).unwrap_or_else(|e| {
            tracing::warn!("Document {} has unreadable form data: {}", self.id, e);
            serde_json::json!({})
        });

        InternshipDocument {
            id: self.id,
            internship_id: self.internship_id,
            document_type,
            form_data,
            attachment_token: self.attachment_token,
            supervisor_pdf_token: self.supervisor_pdf_token,
            status,
            student_signed_at: self.student_signed_at.map(super::from_timestamp),
            advisor_signed_at: self.advisor_signed_at.map(super::from_timestamp),
            leadership_signed_at: self.leadership_signed_at.map(super::from_timestamp),
            is_shared: self.is_shared,
            return_reason: self.return_reason,
            version: self.version,
            created_at: super::from_timestamp(self.created_at),
            updated_at: super::from_timestamp(self.updated_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::internships::entities::{DocumentStatus, DocumentType};

    fn row(document_type: &str, status: &str) -> Model {
        Model {
            id: 7,
            internship_id: 1,
            document_type: document_type.into(),
            form_data: "{}".into(),
            attachment_token: None,
            supervisor_pdf_token: None,
            status: status.into(),
            student_signed_at: None,
            advisor_signed_at: None,
            leadership_signed_at: None,
            is_shared: false,
            return_reason: None,
            version: 3,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_unknown_status_is_not_editable() {
        let document = row("commitment_term", "arquivado??").into_document();
        assert_eq!(document.status, DocumentStatus::Finalized);
        assert_eq!(document.document_type, DocumentType::CommitmentTerm);
        assert_eq!(document.version, 3);
    }

    #[test]
    fn test_known_values_parse() {
        let document = row("commitment_term", "awaiting_signatures").into_document();
        assert_eq!(document.status, DocumentStatus::AwaitingSignatures);
    }
}
