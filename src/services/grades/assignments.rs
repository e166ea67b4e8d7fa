use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GradeService;
use crate::models::{
    ApiResponse, ErrorCode,
    class_sections::requests::ClassSectionListQuery,
    teacher_assignments::responses::{AssignmentListResponse, AssignmentSectionsResponse},
};
use crate::services::{current_user, storage_error};

pub async fn list_own_assignments(
    service: &GradeService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let teacher = current_user(request)?;

    let items = storage
        .list_teacher_assignments(teacher.id)
        .await
        .map_err(storage_error("获取任课信息失败"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        AssignmentListResponse { items },
        "Assignments retrieved successfully",
    )))
}

/// 任课覆盖的班级：同课程、同年级/模块、同教学模式
pub async fn list_assignment_sections(
    service: &GradeService,
    assignment_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let teacher = current_user(request)?;

    // 其他教师的任课同样视为不存在
    let Some(assignment) = storage
        .get_teacher_assignment(assignment_id)
        .await
        .map_err(storage_error("获取任课信息失败"))?
        .filter(|a| a.assignment.teacher_id == teacher.id)
    else {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AssignmentNotFound,
            "Assignment not found",
        )));
    };

    let sections = storage
        .list_class_sections(ClassSectionListQuery {
            course_id: Some(assignment.assignment.course_id),
            year_module: Some(assignment.assignment.year_module),
            shift: None,
            modality: Some(assignment.assignment.modality),
        })
        .await
        .map_err(storage_error("获取班级失败"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        AssignmentSectionsResponse {
            assignment,
            sections,
        },
        "Assignment sections retrieved successfully",
    )))
}
