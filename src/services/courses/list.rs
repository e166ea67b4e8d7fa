use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::models::{ApiResponse, courses::responses::CourseListResponse};
use crate::services::storage_error;

pub async fn list_courses(
    service: &CourseService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let items = storage
        .list_courses()
        .await
        .map_err(storage_error("Failed to retrieve course list"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        CourseListResponse { items },
        "Course list retrieved successfully",
    )))
}
