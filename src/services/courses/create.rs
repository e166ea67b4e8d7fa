use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::errors::CeepSystemError;
use crate::models::{ApiResponse, ErrorCode, courses::requests::CreateCourseRequest};
use crate::services::storage_error;

pub async fn create_course(
    service: &CourseService,
    data: CreateCourseRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let name = data.name.trim();
    if name.is_empty() || name.chars().count() > 100 {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Course name must be between 1 and 100 characters",
        )));
    }

    let storage = service.get_storage(request)?;

    match storage.create_course(name, data.eixo).await {
        Ok(course) => {
            tracing::info!("Course {} created", course.name);
            Ok(HttpResponse::Created().json(ApiResponse::success(course, "Course created successfully")))
        }
        Err(CeepSystemError::Conflict(_)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::CourseAlreadyExists, "Course already exists"),
        )),
        Err(e) => Err(storage_error("Course creation failed")(e)),
    }
}
