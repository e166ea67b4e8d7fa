use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashMap;

use super::GradeService;
use crate::models::{
    ApiResponse,
    grades::{
        entities::format_average,
        responses::{ReportCardResponse, ReportCardRow},
    },
};
use crate::services::{current_user, storage_error};

/// 学生所在班级开设的全部科目，附带该学生的成绩（可能尚未录入）
pub async fn get_report_card(
    service: &GradeService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let student = current_user(request)?;

    let section_ids: Vec<i64> = storage
        .list_student_enrollments(student.id)
        .await
        .map_err(storage_error("获取注册信息失败"))?
        .into_iter()
        .map(|e| e.enrollment.class_section_id)
        .collect();

    let offered = storage
        .list_subjects_for_sections(&section_ids)
        .await
        .map_err(storage_error("获取科目失败"))?;

    let mut grades: HashMap<(i64, i64), _> = storage
        .list_student_grades(student.id)
        .await
        .map_err(storage_error("获取成绩失败"))?
        .into_iter()
        .map(|g| ((g.subject_id, g.class_section_id), g))
        .collect();

    let rows = offered
        .into_iter()
        .map(|(class_section_id, subject)| {
            let grade = grades.remove(&(subject.id, class_section_id));
            ReportCardRow {
                display_average: format_average(grade.as_ref().and_then(|g| g.final_average)),
                class_section_id,
                subject,
                grade,
            }
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        ReportCardResponse { rows },
        "Report card retrieved successfully",
    )))
}
