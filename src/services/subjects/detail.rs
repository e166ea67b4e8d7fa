use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::BTreeMap;

use super::SubjectService;
use crate::models::{
    ApiResponse, ErrorCode,
    subjects::responses::{SubjectDetailResponse, SubjectTeacher},
    teacher_assignments::entities::TeacherAssignmentDetail,
};
use crate::services::storage_error;

pub async fn get_subject(
    service: &SubjectService,
    subject_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let Some(subject) = storage
        .get_subject_by_id(subject_id)
        .await
        .map_err(storage_error("获取科目失败"))?
    else {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SubjectNotFound,
            "Subject not found",
        )));
    };

    let class_section_ids = storage
        .list_subject_section_ids(subject.id)
        .await
        .map_err(storage_error("获取开设班级失败"))?;

    // 按教师分组任课
    let mut grouped: BTreeMap<i64, Vec<TeacherAssignmentDetail>> = BTreeMap::new();
    for detail in storage
        .list_assignments_by_subject(subject.id)
        .await
        .map_err(storage_error("获取任课信息失败"))?
    {
        grouped
            .entry(detail.assignment.teacher_id)
            .or_default()
            .push(detail);
    }

    let teacher_ids: Vec<i64> = grouped.keys().copied().collect();
    let mut teachers: Vec<SubjectTeacher> = storage
        .get_users_by_ids(&teacher_ids)
        .await
        .map_err(storage_error("获取教师失败"))?
        .into_iter()
        .map(|teacher| SubjectTeacher {
            assignments: grouped.remove(&teacher.id).unwrap_or_default(),
            teacher,
        })
        .collect();
    teachers.sort_by_key(|t| t.teacher.full_name().to_lowercase());

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        SubjectDetailResponse {
            subject,
            class_section_ids,
            teachers,
        },
        "Subject retrieved successfully",
    )))
}
