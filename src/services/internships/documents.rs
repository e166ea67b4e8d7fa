use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{
    InternshipService, actor_of, concurrent_change, document_hidden, load_document,
    load_internship, student_eixo_for, workflow_rejection,
};
use crate::errors::CeepSystemError;
use crate::models::{
    ApiResponse, ErrorCode,
    internships::{
        entities::InternshipStatus,
        requests::{CreateDocumentRequest, UpdateDocumentRequest, validate_form_data},
        responses::{DocumentListResponse, DocumentResponse},
        workflow::{self, DocumentContext},
    },
    users::entities::UserRole,
};
use crate::services::{current_user, storage_error};

fn invalid_form(message: &str) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::InternshipInvalid, message))
}

/// 实习下当前用户可见的文档
pub async fn list_documents(
    service: &InternshipService,
    request: &HttpRequest,
    internship_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let actor = actor_of(&current_user(request)?);

    let internship = load_internship(&storage, internship_id).await?;
    let student_eixo = student_eixo_for(&storage, &actor, internship.student_id).await?;
    let ctx = DocumentContext {
        internship: &internship,
        student_eixo,
    };
    if !workflow::can_view_record(&ctx, &actor) {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "You cannot access this internship",
        )));
    }

    let items = storage
        .list_internship_documents(internship.id)
        .await
        .map_err(storage_error("获取实习文档失败"))?
        .into_iter()
        .filter(|doc| workflow::can_view(doc, &ctx, &actor))
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        DocumentListResponse { items },
        "Documents retrieved successfully",
    )))
}

/// 学生为自己的实习新建某类文档，每类一份
pub async fn create_document(
    service: &InternshipService,
    request: &HttpRequest,
    internship_id: i64,
    data: CreateDocumentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    let internship = load_internship(&storage, internship_id).await?;
    if user.role != UserRole::Student || internship.student_id != user.id {
        return Ok(document_hidden());
    }
    if internship.overall_status != InternshipStatus::InProgress {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::DocumentTransitionInvalid,
            "Internship is no longer in progress",
        )));
    }

    let form_data = data
        .form_data
        .unwrap_or_else(|| serde_json::Value::Object(Default::default()));
    if let Err(msg) = validate_form_data(&form_data) {
        return Ok(invalid_form(msg));
    }

    match storage
        .create_internship_document(internship.id, data.document_type, form_data, data.is_shared)
        .await
    {
        Ok(document) => {
            tracing::info!(
                "Document {} ({}) created by student {}",
                document.id,
                document.document_type,
                user.id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                DocumentResponse { document },
                "Document created successfully",
            )))
        }
        Err(CeepSystemError::Conflict(_)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(
                ErrorCode::DocumentAlreadyExists,
                "A document of this type already exists for the internship",
            ),
        )),
        Err(e) => Err(storage_error("创建实习文档失败")(e)),
    }
}

pub async fn get_document(
    service: &InternshipService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let actor = actor_of(&current_user(request)?);

    let scope = load_document(&storage, &actor, id).await?;
    if !workflow::can_view(&scope.document, &scope.context(), &actor) {
        return Ok(document_hidden());
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        DocumentResponse {
            document: scope.document,
        },
        "Document retrieved successfully",
    )))
}

/// 学生编辑草稿的表单内容和共享状态
pub async fn update_document(
    service: &InternshipService,
    request: &HttpRequest,
    id: i64,
    data: UpdateDocumentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let actor = actor_of(&current_user(request)?);

    let scope = load_document(&storage, &actor, id).await?;
    if let Err(err) = workflow::ensure_editable(&scope.document, &scope.context(), &actor) {
        return Ok(workflow_rejection(err));
    }

    let mut next = scope.document.clone();
    if let Some(form_data) = data.form_data {
        if let Err(msg) = validate_form_data(&form_data) {
            return Ok(invalid_form(msg));
        }
        next.form_data = form_data;
    }
    if let Some(is_shared) = data.is_shared {
        next.is_shared = is_shared;
    }

    let Some(document) = storage
        .update_document_if_unchanged(&next)
        .await
        .map_err(storage_error("更新实习文档失败"))?
    else {
        return Ok(concurrent_change());
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        DocumentResponse { document },
        "Document updated successfully",
    )))
}
