use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{InternshipService, actor_of, concurrent_change, load_document, workflow_rejection};
use crate::models::{
    ApiResponse,
    internships::{
        responses::DocumentResponse,
        workflow::{self, DocumentAction},
    },
};
use crate::services::{current_user, storage_error};

/// 签署或退回文档
///
/// 新状态由流程规则计算，写入时要求数据库中的状态仍是读取时的状态，
/// 并发的第二个操作得到 409。
pub async fn transition_document(
    service: &InternshipService,
    request: &HttpRequest,
    id: i64,
    action: DocumentAction,
    reason: Option<String>,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let actor = actor_of(&current_user(request)?);

    let scope = load_document(&storage, &actor, id).await?;
    let next = match workflow::apply(
        &scope.document,
        &scope.context(),
        &actor,
        action,
        reason.as_deref(),
        chrono::Utc::now(),
    ) {
        Ok(next) => next,
        Err(err) => {
            tracing::info!(
                "Rejected {} on document {} by user {}: {}",
                action,
                id,
                actor.user_id,
                err
            );
            return Ok(workflow_rejection(err));
        }
    };

    let Some(document) = storage
        .update_document_if_unchanged(&next)
        .await
        .map_err(storage_error("更新文档状态失败"))?
    else {
        return Ok(concurrent_change());
    };

    tracing::info!(
        "Document {} moved from {} to {} by {} {}",
        document.id,
        scope.document.status,
        document.status,
        actor.role,
        actor.user_id
    );

    let message = match action {
        DocumentAction::Sign => "Document signed successfully",
        DocumentAction::Return => "Document returned to draft",
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        DocumentResponse { document },
        message,
    )))
}
