use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassSectionService;
use crate::models::{
    ApiResponse,
    class_sections::{requests::ClassSectionListQuery, responses::ClassSectionListResponse},
};
use crate::services::storage_error;

pub async fn list_sections(
    service: &ClassSectionService,
    query: ClassSectionListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let items = storage
        .list_class_sections(query)
        .await
        .map_err(storage_error("Failed to retrieve class sections"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        ClassSectionListResponse { items },
        "Class sections retrieved successfully",
    )))
}
