use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassSectionService;
use crate::errors::CeepSystemError;
use crate::models::{
    ApiResponse, ErrorCode,
    class_sections::{
        entities::resolve_modality,
        requests::{CreateClassSectionRequest, NewClassSection},
    },
};
use crate::services::storage_error;

pub async fn create_section(
    service: &ClassSectionService,
    data: CreateClassSectionRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    // 白天班强制为 EPI，夜间班必须指定成人教学模式
    let modality = match resolve_modality(data.shift, data.modality) {
        Ok(modality) => modality,
        Err(msg) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::ClassSectionInvalid, msg)));
        }
    };

    let label = data.label.trim().to_uppercase();
    if label.chars().count() > 10 {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ClassSectionInvalid,
            "Section label must be at most 10 characters",
        )));
    }

    let storage = service.get_storage(request)?;

    let course = storage
        .get_course_by_id(data.course_id)
        .await
        .map_err(storage_error("获取课程失败"))?;
    if course.is_none() {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::CourseNotFound,
            "Course not found",
        )));
    }

    let section = NewClassSection {
        course_id: data.course_id,
        year_module: data.year_module,
        shift: data.shift,
        label,
        modality,
        room: data
            .room
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty()),
    };

    match storage.create_class_section(section).await {
        Ok(section) => Ok(HttpResponse::Created().json(ApiResponse::success(
            section,
            "Class section created successfully",
        ))),
        Err(CeepSystemError::Conflict(_)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(
                ErrorCode::ClassSectionAlreadyExists,
                "Class section already exists",
            ),
        )),
        Err(e) => Err(storage_error("Class section creation failed")(e)),
    }
}
