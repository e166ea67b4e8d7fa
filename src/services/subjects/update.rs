use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{SubjectService, validate_subject};
use crate::models::{ApiResponse, ErrorCode, subjects::requests::UpdateSubjectRequest};
use crate::services::storage_error;

pub async fn update_subject(
    service: &SubjectService,
    subject_id: i64,
    mut data: UpdateSubjectRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_subject(data.name.as_deref(), data.workload_hours) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::SubjectInvalid, msg)));
    }
    data.name = data.name.map(|n| n.trim().to_string());

    let storage = service.get_storage(request)?;

    match storage
        .update_subject(subject_id, data)
        .await
        .map_err(storage_error("Subject update failed"))?
    {
        Some(subject) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            subject,
            "Subject updated successfully",
        ))),
        None => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SubjectNotFound,
            "Subject not found",
        ))),
    }
}
