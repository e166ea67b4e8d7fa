//! 实习文档签署流程
//!
//! 文档状态只能按 草稿 -> 待签署 -> 审核中 -> 已归档 的顺序推进：
//!
//! | 当前状态 | 动作 | 执行者 | 目标状态 |
//! |---|---|---|---|
//! | draft | sign | 所属学生 | awaiting_signatures |
//! | awaiting_signatures | sign | 指导教师 | under_review |
//! | under_review | sign | 学校领导 | finalized |
//! | awaiting_signatures | return | 指导教师 | draft |
//! | under_review | return | 同方向行政人员 / 学校领导 | draft |
//!
//! 本模块只做纯计算，持久化由存储层以比较并交换的方式完成。

use super::entities::{DocumentStatus, Internship, InternshipDocument, InternshipStatus};
use crate::models::users::entities::{Eixo, UserRole};
use chrono::{DateTime, Utc};
use std::fmt;

define_string_enum! {
    #[ts(export, export_to = "../frontend/src/types/generated/internship.ts")]
    pub enum DocumentAction ("文档操作") {
        Sign => ("sign", "Assinar"),
        Return => ("return", "Devolver"),
    }
}

/// 执行操作的用户
#[derive(Debug, Clone, Copy)]
pub struct Actor {
    pub user_id: i64,
    pub role: UserRole,
    pub eixo: Option<Eixo>,
}

/// 文档所在的上下文
#[derive(Debug, Clone, Copy)]
pub struct DocumentContext<'a> {
    pub internship: &'a Internship,
    /// 学生所在课程的方向
    pub student_eixo: Option<Eixo>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowError {
    /// 当前执行者已经签署过
    AlreadySigned,
    /// 不是该实习的指导教师
    NotAssignedAdvisor,
    /// 执行者不参与该文档的流程
    NotParticipant,
    /// 尚未轮到该执行者
    OutOfOrder,
    /// 文档已归档
    Finalized,
    /// 实习已结束或取消
    InternshipClosed,
    /// 文档不处于可编辑状态
    NotEditable,
}

impl WorkflowError {
    /// 权限类错误返回 403，其余为状态冲突 409
    pub fn is_forbidden(&self) -> bool {
        matches!(
            self,
            WorkflowError::NotAssignedAdvisor | WorkflowError::NotParticipant
        )
    }
}

impl fmt::Display for WorkflowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            WorkflowError::AlreadySigned => "Document already signed by this party",
            WorkflowError::NotAssignedAdvisor => "Only the assigned advisor can act on this document",
            WorkflowError::NotParticipant => "User does not take part in this document workflow",
            WorkflowError::OutOfOrder => "Document is not awaiting this party's action",
            WorkflowError::Finalized => "Document is finalized",
            WorkflowError::InternshipClosed => "Internship is no longer in progress",
            WorkflowError::NotEditable => "Document can no longer be edited",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for WorkflowError {}

fn is_owner(ctx: &DocumentContext<'_>, actor: &Actor) -> bool {
    actor.role == UserRole::Student && ctx.internship.student_id == actor.user_id
}

fn is_advisor(ctx: &DocumentContext<'_>, actor: &Actor) -> bool {
    actor.role == UserRole::Teacher && ctx.internship.advisor_id == Some(actor.user_id)
}

fn same_eixo(ctx: &DocumentContext<'_>, actor: &Actor) -> bool {
    actor.role == UserRole::Staff && actor.eixo.is_some() && actor.eixo == ctx.student_eixo
}

fn ensure_open(doc: &InternshipDocument, ctx: &DocumentContext<'_>) -> Result<(), WorkflowError> {
    if doc.status == DocumentStatus::Finalized {
        return Err(WorkflowError::Finalized);
    }
    if ctx.internship.overall_status != InternshipStatus::InProgress {
        return Err(WorkflowError::InternshipClosed);
    }
    Ok(())
}

/// 签署文档
pub fn sign(
    doc: &InternshipDocument,
    ctx: &DocumentContext<'_>,
    actor: &Actor,
    now: DateTime<Utc>,
) -> Result<InternshipDocument, WorkflowError> {
    ensure_open(doc, ctx)?;
    let mut next = doc.clone();
    match actor.role {
        UserRole::Student => {
            if !is_owner(ctx, actor) {
                return Err(WorkflowError::NotParticipant);
            }
            if doc.status != DocumentStatus::Draft {
                return Err(WorkflowError::AlreadySigned);
            }
            next.status = DocumentStatus::AwaitingSignatures;
            next.student_signed_at = Some(now);
            next.is_shared = true;
            next.return_reason = None;
        }
        UserRole::Teacher => {
            if !is_advisor(ctx, actor) {
                return Err(WorkflowError::NotAssignedAdvisor);
            }
            match doc.status {
                DocumentStatus::AwaitingSignatures => {}
                DocumentStatus::Draft => return Err(WorkflowError::OutOfOrder),
                _ => return Err(WorkflowError::AlreadySigned),
            }
            next.status = DocumentStatus::UnderReview;
            next.advisor_signed_at = Some(now);
        }
        UserRole::Leadership => {
            if doc.status != DocumentStatus::UnderReview {
                return Err(WorkflowError::OutOfOrder);
            }
            next.status = DocumentStatus::Finalized;
            next.leadership_signed_at = Some(now);
        }
        UserRole::Admin | UserRole::Staff => return Err(WorkflowError::NotParticipant),
    }
    next.updated_at = now;
    Ok(next)
}

/// 退回文档到草稿，清除所有签名
pub fn return_to_draft(
    doc: &InternshipDocument,
    ctx: &DocumentContext<'_>,
    actor: &Actor,
    reason: Option<&str>,
    now: DateTime<Utc>,
) -> Result<InternshipDocument, WorkflowError> {
    ensure_open(doc, ctx)?;
    let expected = match actor.role {
        UserRole::Teacher => {
            if !is_advisor(ctx, actor) {
                return Err(WorkflowError::NotAssignedAdvisor);
            }
            DocumentStatus::AwaitingSignatures
        }
        UserRole::Staff => {
            if !same_eixo(ctx, actor) {
                return Err(WorkflowError::NotParticipant);
            }
            DocumentStatus::UnderReview
        }
        UserRole::Leadership => DocumentStatus::UnderReview,
        UserRole::Student | UserRole::Admin => return Err(WorkflowError::NotParticipant),
    };
    if doc.status != expected {
        return Err(WorkflowError::OutOfOrder);
    }

    let mut next = doc.clone();
    next.status = DocumentStatus::Draft;
    next.student_signed_at = None;
    next.advisor_signed_at = None;
    next.leadership_signed_at = None;
    next.return_reason = reason
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string);
    next.updated_at = now;
    Ok(next)
}

/// 按动作分派
pub fn apply(
    doc: &InternshipDocument,
    ctx: &DocumentContext<'_>,
    actor: &Actor,
    action: DocumentAction,
    reason: Option<&str>,
    now: DateTime<Utc>,
) -> Result<InternshipDocument, WorkflowError> {
    match action {
        DocumentAction::Sign => sign(doc, ctx, actor, now),
        DocumentAction::Return => return_to_draft(doc, ctx, actor, reason, now),
    }
}

/// 文档对指导教师和行政人员是否可见
fn visible_to_reviewers(doc: &InternshipDocument) -> bool {
    doc.is_shared || doc.status != DocumentStatus::Draft
}

pub fn can_view(doc: &InternshipDocument, ctx: &DocumentContext<'_>, actor: &Actor) -> bool {
    match actor.role {
        UserRole::Admin => true,
        UserRole::Student => is_owner(ctx, actor),
        UserRole::Teacher => is_advisor(ctx, actor) && visible_to_reviewers(doc),
        UserRole::Staff => same_eixo(ctx, actor) && visible_to_reviewers(doc),
        UserRole::Leadership => visible_to_reviewers(doc),
    }
}

/// 实习档案本身的可见范围
pub fn can_view_record(ctx: &DocumentContext<'_>, actor: &Actor) -> bool {
    match actor.role {
        UserRole::Admin | UserRole::Leadership => true,
        UserRole::Student => is_owner(ctx, actor),
        UserRole::Teacher => is_advisor(ctx, actor),
        UserRole::Staff => same_eixo(ctx, actor),
    }
}

/// 学生编辑表单内容和附件：仅草稿
pub fn ensure_editable(
    doc: &InternshipDocument,
    ctx: &DocumentContext<'_>,
    actor: &Actor,
) -> Result<(), WorkflowError> {
    if !is_owner(ctx, actor) {
        return Err(WorkflowError::NotParticipant);
    }
    ensure_open(doc, ctx)?;
    if doc.status != DocumentStatus::Draft {
        return Err(WorkflowError::NotEditable);
    }
    Ok(())
}

/// 上传主管签字版 PDF：草稿或待签署
pub fn ensure_supervisor_pdf_allowed(
    doc: &InternshipDocument,
    ctx: &DocumentContext<'_>,
    actor: &Actor,
) -> Result<(), WorkflowError> {
    if !is_owner(ctx, actor) {
        return Err(WorkflowError::NotParticipant);
    }
    ensure_open(doc, ctx)?;
    match doc.status {
        DocumentStatus::Draft | DocumentStatus::AwaitingSignatures => Ok(()),
        _ => Err(WorkflowError::NotEditable),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::internships::entities::DocumentType;
    use chrono::NaiveDate;

    const STUDENT: i64 = 10;
    const ADVISOR: i64 = 20;
    const OTHER_TEACHER: i64 = 21;

    fn internship() -> Internship {
        let now = Utc::now();
        Internship {
            id: 1,
            student_id: STUDENT,
            advisor_id: Some(ADVISOR),
            supervisor_name: "Ana".into(),
            supervisor_company: "Clínica".into(),
            supervisor_position: "Gerente".into(),
            supervisor_email: None,
            start_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
            overall_status: InternshipStatus::InProgress,
            created_at: now,
            updated_at: now,
        }
    }

    fn document() -> InternshipDocument {
        let now = Utc::now();
        InternshipDocument {
            id: 1,
            internship_id: 1,
            document_type: DocumentType::CommitmentTerm,
            form_data: serde_json::json!({}),
            attachment_token: None,
            supervisor_pdf_token: None,
            status: DocumentStatus::Draft,
            student_signed_at: None,
            advisor_signed_at: None,
            leadership_signed_at: None,
            is_shared: false,
            return_reason: None,
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    fn actor(user_id: i64, role: UserRole, eixo: Option<Eixo>) -> Actor {
        Actor { user_id, role, eixo }
    }

    fn student() -> Actor {
        actor(STUDENT, UserRole::Student, None)
    }

    fn advisor() -> Actor {
        actor(ADVISOR, UserRole::Teacher, None)
    }

    fn leadership() -> Actor {
        actor(30, UserRole::Leadership, None)
    }

    fn ctx(internship: &Internship) -> DocumentContext<'_> {
        DocumentContext {
            internship,
            student_eixo: Some(Eixo::Saude),
        }
    }

    #[test]
    fn test_full_signature_chain() {
        let record = internship();
        let ctx = ctx(&record);
        let now = Utc::now();

        let doc = sign(&document(), &ctx, &student(), now).unwrap();
        assert_eq!(doc.status, DocumentStatus::AwaitingSignatures);
        assert!(doc.is_shared);
        assert_eq!(doc.student_signed_at, Some(now));

        let doc = sign(&doc, &ctx, &advisor(), now).unwrap();
        assert_eq!(doc.status, DocumentStatus::UnderReview);
        assert!(doc.advisor_signed_at.is_some());

        let doc = sign(&doc, &ctx, &leadership(), now).unwrap();
        assert_eq!(doc.status, DocumentStatus::Finalized);
        assert!(doc.leadership_signed_at.is_some());
    }

    #[test]
    fn test_student_cannot_sign_twice() {
        let record = internship();
        let ctx = ctx(&record);
        let doc = sign(&document(), &ctx, &student(), Utc::now()).unwrap();
        assert_eq!(
            sign(&doc, &ctx, &student(), Utc::now()),
            Err(WorkflowError::AlreadySigned)
        );
    }

    #[test]
    fn test_only_assigned_advisor_signs() {
        let record = internship();
        let ctx = ctx(&record);
        let doc = sign(&document(), &ctx, &student(), Utc::now()).unwrap();
        let other = actor(OTHER_TEACHER, UserRole::Teacher, None);
        let err = sign(&doc, &ctx, &other, Utc::now()).unwrap_err();
        assert_eq!(err, WorkflowError::NotAssignedAdvisor);
        assert!(err.is_forbidden());
    }

    #[test]
    fn test_leadership_waits_for_advisor() {
        let record = internship();
        let ctx = ctx(&record);
        let doc = sign(&document(), &ctx, &student(), Utc::now()).unwrap();
        let err = sign(&doc, &ctx, &leadership(), Utc::now()).unwrap_err();
        assert_eq!(err, WorkflowError::OutOfOrder);
        assert!(!err.is_forbidden());
    }

    #[test]
    fn test_advisor_cannot_sign_draft() {
        let record = internship();
        let ctx = ctx(&record);
        assert_eq!(
            sign(&document(), &ctx, &advisor(), Utc::now()),
            Err(WorkflowError::OutOfOrder)
        );
    }

    #[test]
    fn test_finalized_is_terminal() {
        let record = internship();
        let ctx = ctx(&record);
        let mut doc = document();
        doc.status = DocumentStatus::Finalized;
        assert_eq!(
            sign(&doc, &ctx, &leadership(), Utc::now()),
            Err(WorkflowError::Finalized)
        );
        assert_eq!(
            return_to_draft(&doc, &ctx, &leadership(), None, Utc::now()),
            Err(WorkflowError::Finalized)
        );
    }

    #[test]
    fn test_return_clears_signatures() {
        let record = internship();
        let ctx = ctx(&record);
        let now = Utc::now();
        let doc = sign(&document(), &ctx, &student(), now).unwrap();
        let doc = sign(&doc, &ctx, &advisor(), now).unwrap();

        let staff = actor(40, UserRole::Staff, Some(Eixo::Saude));
        let doc = return_to_draft(&doc, &ctx, &staff, Some("  falta assinatura "), now).unwrap();
        assert_eq!(doc.status, DocumentStatus::Draft);
        assert!(doc.student_signed_at.is_none());
        assert!(doc.advisor_signed_at.is_none());
        assert_eq!(doc.return_reason.as_deref(), Some("falta assinatura"));
    }

    #[test]
    fn test_staff_of_other_eixo_cannot_return() {
        let record = internship();
        let ctx = ctx(&record);
        let now = Utc::now();
        let doc = sign(&document(), &ctx, &student(), now).unwrap();
        let doc = sign(&doc, &ctx, &advisor(), now).unwrap();
        let staff = actor(41, UserRole::Staff, Some(Eixo::Gestao));
        assert_eq!(
            return_to_draft(&doc, &ctx, &staff, None, now),
            Err(WorkflowError::NotParticipant)
        );
    }

    #[test]
    fn test_advisor_returns_only_awaiting() {
        let record = internship();
        let ctx = ctx(&record);
        let now = Utc::now();
        let doc = sign(&document(), &ctx, &student(), now).unwrap();
        let back = return_to_draft(&doc, &ctx, &advisor(), None, now).unwrap();
        assert_eq!(back.status, DocumentStatus::Draft);
        assert_eq!(back.return_reason, None);

        let doc = sign(&doc, &ctx, &advisor(), now).unwrap();
        assert_eq!(
            return_to_draft(&doc, &ctx, &advisor(), None, now),
            Err(WorkflowError::OutOfOrder)
        );
    }

    #[test]
    fn test_closed_internship_rejects_transitions() {
        let mut record = internship();
        record.overall_status = InternshipStatus::Cancelled;
        let ctx = ctx(&record);
        assert_eq!(
            apply(&document(), &ctx, &student(), DocumentAction::Sign, None, Utc::now()),
            Err(WorkflowError::InternshipClosed)
        );
    }

    #[test]
    fn test_visibility() {
        let record = internship();
        let ctx = ctx(&record);
        let draft = document();
        assert!(can_view(&draft, &ctx, &student()));
        assert!(!can_view(&draft, &ctx, &advisor()));
        assert!(!can_view(&draft, &ctx, &leadership()));

        let mut shared = document();
        shared.is_shared = true;
        assert!(can_view(&shared, &ctx, &advisor()));
        let staff_same = actor(40, UserRole::Staff, Some(Eixo::Saude));
        let staff_other = actor(41, UserRole::Staff, Some(Eixo::Gestao));
        assert!(can_view(&shared, &ctx, &staff_same));
        assert!(!can_view(&shared, &ctx, &staff_other));
        let stranger = actor(99, UserRole::Student, None);
        assert!(!can_view(&shared, &ctx, &stranger));
    }

    #[test]
    fn test_editing_rules() {
        let record = internship();
        let ctx = ctx(&record);
        let now = Utc::now();
        let draft = document();
        assert!(ensure_editable(&draft, &ctx, &student()).is_ok());
        assert_eq!(
            ensure_editable(&draft, &ctx, &advisor()),
            Err(WorkflowError::NotParticipant)
        );

        let awaiting = sign(&draft, &ctx, &student(), now).unwrap();
        assert_eq!(
            ensure_editable(&awaiting, &ctx, &student()),
            Err(WorkflowError::NotEditable)
        );
        assert!(ensure_supervisor_pdf_allowed(&awaiting, &ctx, &student()).is_ok());

        let review = sign(&awaiting, &ctx, &advisor(), now).unwrap();
        assert_eq!(
            ensure_supervisor_pdf_allowed(&review, &ctx, &student()),
            Err(WorkflowError::NotEditable)
        );
    }

    #[test]
    fn test_record_visibility() {
        let record = internship();
        let c = ctx(&record);
        assert!(can_view_record(&c, &student()));
        assert!(can_view_record(&c, &advisor()));
        assert!(can_view_record(&c, &leadership()));
        assert!(!can_view_record(&c, &actor(OTHER_TEACHER, UserRole::Teacher, None)));
        assert!(can_view_record(&c, &actor(40, UserRole::Staff, Some(Eixo::Saude))));
        assert!(!can_view_record(&c, &actor(41, UserRole::Staff, Some(Eixo::Gestao))));
        assert!(!can_view_record(&c, &actor(42, UserRole::Staff, None)));
    }
}
