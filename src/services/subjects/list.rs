use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubjectService;
use crate::models::{ApiResponse, subjects::responses::SubjectListResponse};
use crate::services::storage_error;

pub async fn list_subjects(
    service: &SubjectService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let items = storage
        .list_subjects()
        .await
        .map_err(storage_error("Failed to retrieve subjects"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        SubjectListResponse { items },
        "Subjects retrieved successfully",
    )))
}
