use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{SubjectService, validate_subject};
use crate::models::{ApiResponse, ErrorCode, subjects::requests::CreateSubjectRequest};
use crate::services::storage_error;

pub async fn create_subject(
    service: &SubjectService,
    data: CreateSubjectRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_subject(Some(&data.name), Some(data.workload_hours)) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::SubjectInvalid, msg)));
    }

    let storage = service.get_storage(request)?;

    let subject = storage
        .create_subject(data.name.trim(), data.workload_hours, &data.class_section_ids)
        .await
        .map_err(storage_error("Subject creation failed"))?;

    tracing::info!("Subject {} created", subject.name);
    Ok(HttpResponse::Created().json(ApiResponse::success(subject, "Subject created successfully")))
}
