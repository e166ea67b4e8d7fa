use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassSectionService;
use crate::models::{ApiResponse, ErrorCode, class_sections::responses::ClassSectionDetailResponse};
use crate::services::storage_error;

pub async fn get_section(
    service: &ClassSectionService,
    section_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let Some(section) = storage
        .get_class_section_by_id(section_id)
        .await
        .map_err(storage_error("获取班级失败"))?
    else {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ClassSectionNotFound,
            "Class section not found",
        )));
    };

    let students = storage
        .list_section_students(section.id)
        .await
        .map_err(storage_error("获取班级学生失败"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        ClassSectionDetailResponse { section, students },
        "Class section retrieved successfully",
    )))
}
