pub mod attachments;
pub mod documents;
pub mod records;
pub mod transitions;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::StatusCode};
use std::sync::Arc;

use crate::models::{
    ApiResponse, ErrorCode,
    internships::{
        entities::{Internship, InternshipDocument},
        requests::{
            CreateDocumentRequest, CreateInternshipRequest, InternshipListParams,
            ReturnDocumentRequest, UpdateDocumentRequest, UpdateInternshipRequest,
        },
        workflow::{Actor, DocumentAction, DocumentContext, WorkflowError},
    },
    users::entities::{Eixo, User, UserRole},
};
use crate::services::{reject, storage_error};
use crate::storage::Storage;

pub struct InternshipService {
    storage: Option<Arc<dyn Storage>>,
}

impl InternshipService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_internships(
        &self,
        request: &HttpRequest,
        query: InternshipListParams,
    ) -> ActixResult<HttpResponse> {
        records::list_internships(self, request, query).await
    }

    pub async fn get_internship(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        records::get_internship(self, request, id).await
    }

    pub async fn create_internship(
        &self,
        request: &HttpRequest,
        data: CreateInternshipRequest,
    ) -> ActixResult<HttpResponse> {
        records::create_internship(self, request, data).await
    }

    pub async fn update_internship(
        &self,
        request: &HttpRequest,
        id: i64,
        data: UpdateInternshipRequest,
    ) -> ActixResult<HttpResponse> {
        records::update_internship(self, request, id, data).await
    }

    pub async fn list_documents(
        &self,
        request: &HttpRequest,
        internship_id: i64,
    ) -> ActixResult<HttpResponse> {
        documents::list_documents(self, request, internship_id).await
    }

    pub async fn create_document(
        &self,
        request: &HttpRequest,
        internship_id: i64,
        data: CreateDocumentRequest,
    ) -> ActixResult<HttpResponse> {
        documents::create_document(self, request, internship_id, data).await
    }

    pub async fn get_document(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        documents::get_document(self, request, id).await
    }

    pub async fn update_document(
        &self,
        request: &HttpRequest,
        id: i64,
        data: UpdateDocumentRequest,
    ) -> ActixResult<HttpResponse> {
        documents::update_document(self, request, id, data).await
    }

    pub async fn sign_document(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        transitions::transition_document(self, request, id, DocumentAction::Sign, None).await
    }

    pub async fn return_document(
        &self,
        request: &HttpRequest,
        id: i64,
        data: ReturnDocumentRequest,
    ) -> ActixResult<HttpResponse> {
        transitions::transition_document(self, request, id, DocumentAction::Return, data.reason)
            .await
    }

    pub async fn upload_attachment(
        &self,
        request: &HttpRequest,
        id: i64,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        attachments::upload(self, request, id, attachments::Slot::Attachment, payload).await
    }

    pub async fn upload_supervisor_pdf(
        &self,
        request: &HttpRequest,
        id: i64,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        attachments::upload(self, request, id, attachments::Slot::SupervisorPdf, payload).await
    }

    pub async fn download_attachment(
        &self,
        request: &HttpRequest,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        attachments::download(self, request, id, attachments::Slot::Attachment).await
    }

    pub async fn download_supervisor_pdf(
        &self,
        request: &HttpRequest,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        attachments::download(self, request, id, attachments::Slot::SupervisorPdf).await
    }
}

pub(crate) fn actor_of(user: &User) -> Actor {
    Actor {
        user_id: user.id,
        role: user.role,
        eixo: user.eixo,
    }
}

/// 文档及其所属实习、学生方向
pub(crate) struct DocumentScope {
    pub document: InternshipDocument,
    pub internship: Internship,
    pub student_eixo: Option<Eixo>,
}

impl DocumentScope {
    pub fn context(&self) -> DocumentContext<'_> {
        DocumentContext {
            internship: &self.internship,
            student_eixo: self.student_eixo,
        }
    }
}

/// 读取实习档案，不存在时 404
pub(crate) async fn load_internship(storage: &Arc<dyn Storage>, id: i64) -> ActixResult<Internship> {
    storage
        .get_internship_by_id(id)
        .await
        .map_err(storage_error("获取实习档案失败"))?
        .ok_or_else(|| {
            reject(
                StatusCode::NOT_FOUND,
                ErrorCode::InternshipNotFound,
                "Internship not found",
            )
        })
}

/// 学生所在课程的方向，只有行政人员的判断需要
pub(crate) async fn student_eixo_for(
    storage: &Arc<dyn Storage>,
    actor: &Actor,
    student_id: i64,
) -> ActixResult<Option<Eixo>> {
    if actor.role != UserRole::Staff {
        return Ok(None);
    }
    storage
        .get_student_eixo(student_id)
        .await
        .map_err(storage_error("获取学生方向失败"))
}

pub(crate) async fn load_document(
    storage: &Arc<dyn Storage>,
    actor: &Actor,
    id: i64,
) -> ActixResult<DocumentScope> {
    let document = storage
        .get_internship_document(id)
        .await
        .map_err(storage_error("获取实习文档失败"))?
        .ok_or_else(|| {
            reject(
                StatusCode::NOT_FOUND,
                ErrorCode::DocumentNotFound,
                "Document not found",
            )
        })?;
    let internship = load_internship(storage, document.internship_id).await?;
    let student_eixo = student_eixo_for(storage, actor, internship.student_id).await?;

    Ok(DocumentScope {
        document,
        internship,
        student_eixo,
    })
}

/// 流程错误到响应的映射：权限问题 403，状态问题 409
pub(crate) fn workflow_rejection(err: WorkflowError) -> HttpResponse {
    let message = err.to_string();
    if err.is_forbidden() {
        return HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::DocumentAccessDenied,
            message,
        ));
    }
    let code = match err {
        WorkflowError::NotEditable => ErrorCode::DocumentNotEditable,
        _ => ErrorCode::DocumentTransitionInvalid,
    };
    HttpResponse::Conflict().json(ApiResponse::error_empty(code, message))
}

/// 并发写入时状态已被他人改变
pub(crate) fn concurrent_change() -> HttpResponse {
    HttpResponse::Conflict().json(ApiResponse::error_empty(
        ErrorCode::DocumentTransitionInvalid,
        "Document was changed by another request, reload and try again",
    ))
}

pub(crate) fn document_hidden() -> HttpResponse {
    HttpResponse::Forbidden().json(ApiResponse::error_empty(
        ErrorCode::DocumentAccessDenied,
        "You cannot access this document",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workflow_rejection_status() {
        assert_eq!(
            workflow_rejection(WorkflowError::NotAssignedAdvisor).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            workflow_rejection(WorkflowError::AlreadySigned).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            workflow_rejection(WorkflowError::NotEditable).status(),
            StatusCode::CONFLICT
        );
    }
}
