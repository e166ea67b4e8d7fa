use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

define_string_enum! {
    #[ts(export, export_to = "../frontend/src/types/generated/internship.ts")]
    pub enum InternshipStatus ("实习状态") {
        InProgress => ("in_progress", "Em andamento"),
        Completed => ("completed", "Concluído"),
        Cancelled => ("cancelled", "Cancelado"),
    }
}

define_string_enum! {
    #[ts(export, export_to = "../frontend/src/types/generated/internship.ts")]
    pub enum DocumentType ("文档类型") {
        AdvisorEvaluation => ("advisor_evaluation", "Avaliação do Orientador"),
        SupervisorEvaluation => ("supervisor_evaluation", "Avaliação do Supervisor"),
        CommitmentTerm => ("commitment_term", "Termo de Compromisso"),
        IdentificationForm => ("identification_form", "Ficha de Identificação"),
        PersonalForm => ("personal_form", "Ficha Pessoal"),
        ProofOfResidence => ("proof_of_residence", "Comprovante de Residência"),
        UtilityBill => ("utility_bill", "Comprovante de Água/Luz"),
        IdCard => ("id_card", "Cartão de Identidade"),
        SusCard => ("sus_card", "Cartão do SUS"),
        VaccinationCard => ("vaccination_card", "Cartão de Vacina"),
        InsurancePolicy => ("insurance_policy", "Apólice de Seguro"),
    }
}

define_string_enum! {
    #[ts(export, export_to = "../frontend/src/types/generated/internship.ts")]
    pub enum DocumentStatus ("文档状态") {
        Draft => ("draft", "Rascunho"),
        AwaitingSignatures => ("awaiting_signatures", "Aguardando Assinaturas"),
        UnderReview => ("under_review", "Em Verificação"),
        Finalized => ("finalized", "Finalizado e Arquivado"),
    }
}

// 实习档案，每个学生一份
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/internship.ts")]
pub struct Internship {
    pub id: i64,
    pub student_id: i64,
    /// 指导教师，教师被删除时置空
    pub advisor_id: Option<i64>,
    pub supervisor_name: String,
    pub supervisor_company: String,
    pub supervisor_position: String,
    pub supervisor_email: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub overall_status: InternshipStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 实习文档
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/internship.ts")]
pub struct InternshipDocument {
    pub id: i64,
    pub internship_id: i64,
    pub document_type: DocumentType,
    /// 表单内容（JSON 对象）
    pub form_data: serde_json::Value,
    pub attachment_token: Option<String>,
    pub supervisor_pdf_token: Option<String>,
    pub status: DocumentStatus,
    pub student_signed_at: Option<chrono::DateTime<chrono::Utc>>,
    pub advisor_signed_at: Option<chrono::DateTime<chrono::Utc>>,
    pub leadership_signed_at: Option<chrono::DateTime<chrono::Utc>>,
    /// 是否对指导教师和行政人员可见
    pub is_shared: bool,
    pub return_reason: Option<String>,
    /// 行版本，每次写入加一
    pub version: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
