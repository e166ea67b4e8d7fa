use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{
    InternshipService, actor_of, concurrent_change, document_hidden, load_document,
    workflow_rejection,
};
use crate::models::{
    ApiResponse, ErrorCode,
    internships::{responses::DocumentResponse, workflow},
};
use crate::services::{current_user, files, storage_error};

/// 文档上的两个文件位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// 学生附件，草稿阶段可替换
    Attachment,
    /// 主管签字的 PDF，草稿或待签署阶段可上传
    SupervisorPdf,
}

impl Slot {
    fn required_extension(self) -> Option<&'static str> {
        match self {
            Slot::Attachment => None,
            Slot::SupervisorPdf => Some(".pdf"),
        }
    }
}

pub async fn upload(
    service: &InternshipService,
    request: &HttpRequest,
    id: i64,
    slot: Slot,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let actor = actor_of(&current_user(request)?);

    let scope = load_document(&storage, &actor, id).await?;
    let allowed = match slot {
        Slot::Attachment => workflow::ensure_editable(&scope.document, &scope.context(), &actor),
        Slot::SupervisorPdf => {
            workflow::ensure_supervisor_pdf_allowed(&scope.document, &scope.context(), &actor)
        }
    };
    if let Err(err) = allowed {
        return Ok(workflow_rejection(err));
    }

    let file = match files::receive_upload(&storage, request, payload, slot.required_extension())
        .await?
    {
        Ok(file) => file,
        Err(response) => return Ok(response),
    };

    let mut next = scope.document.clone();
    match slot {
        Slot::Attachment => next.attachment_token = Some(file.token.clone()),
        Slot::SupervisorPdf => next.supervisor_pdf_token = Some(file.token.clone()),
    }

    let Some(document) = storage
        .update_document_if_unchanged(&next)
        .await
        .map_err(storage_error("保存文档附件失败"))?
    else {
        return Ok(concurrent_change());
    };

    tracing::info!(
        "File {} ({} bytes) attached to document {} as {:?}",
        file.token,
        file.file_size,
        document.id,
        slot
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        DocumentResponse { document },
        "File uploaded successfully",
    )))
}

pub async fn download(
    service: &InternshipService,
    request: &HttpRequest,
    id: i64,
    slot: Slot,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let actor = actor_of(&current_user(request)?);

    let scope = load_document(&storage, &actor, id).await?;
    if !workflow::can_view(&scope.document, &scope.context(), &actor) {
        return Ok(document_hidden());
    }

    let token = match slot {
        Slot::Attachment => scope.document.attachment_token.as_deref(),
        Slot::SupervisorPdf => scope.document.supervisor_pdf_token.as_deref(),
    };
    let Some(token) = token else {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::FileNotFound,
            "No file uploaded for this document",
        )));
    };

    files::serve_file(&storage, token).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supervisor_pdf_requires_pdf() {
        assert_eq!(Slot::SupervisorPdf.required_extension(), Some(".pdf"));
        assert_eq!(Slot::Attachment.required_extension(), None);
    }
}
