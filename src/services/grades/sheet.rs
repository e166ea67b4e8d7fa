use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashMap;

use super::GradeService;
use crate::models::{
    ApiResponse, ErrorCode,
    grades::{
        requests::GradeSheetQuery,
        responses::{GradeSheetResponse, GradeSheetRow},
    },
};
use crate::services::{current_user, storage_error};

/// 某科目在某班级的成绩表，只有该班级的任课教师可以查看
pub async fn get_sheet(
    service: &GradeService,
    query: GradeSheetQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let teacher = current_user(request)?;

    let Some(subject) = storage
        .get_subject_by_id(query.subject_id)
        .await
        .map_err(storage_error("获取科目失败"))?
    else {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SubjectNotFound,
            "Subject not found",
        )));
    };

    let Some(section) = storage
        .get_class_section_by_id(query.class_section_id)
        .await
        .map_err(storage_error("获取班级失败"))?
    else {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ClassSectionNotFound,
            "Class section not found",
        )));
    };

    let teaches = storage
        .teacher_teaches_section(teacher.id, subject.id, &section)
        .await
        .map_err(storage_error("校验任课失败"))?;
    if !teaches {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::GradeNotAllowed,
            "You do not teach this subject in this section",
        )));
    }

    let students = storage
        .list_section_students(section.id)
        .await
        .map_err(storage_error("获取班级学生失败"))?;

    let mut grades: HashMap<i64, _> = storage
        .list_grades_for_section_subject(subject.id, section.id)
        .await
        .map_err(storage_error("获取成绩失败"))?
        .into_iter()
        .map(|g| (g.student_id, g))
        .collect();

    let rows = students
        .into_iter()
        .map(|student| GradeSheetRow {
            grade: grades.remove(&student.id),
            student,
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        GradeSheetResponse {
            subject,
            section,
            rows,
        },
        "Grade sheet retrieved successfully",
    )))
}
