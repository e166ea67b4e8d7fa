use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GradeService;
use crate::models::{
    ApiResponse, ErrorCode,
    grades::{
        entities::Grade,
        requests::{SaveGradeRequest, parse_optional_mark},
        responses::SaveGradeResponse,
    },
};
use crate::services::system::DynamicConfig;
use crate::services::{current_user, storage_error};

struct ParsedMarks {
    mark_1: Option<f64>,
    mark_2: Option<f64>,
    mark_3: Option<f64>,
    remedial_mark: Option<f64>,
}

fn parse_marks(data: &SaveGradeRequest, max_mark: f64) -> Result<ParsedMarks, String> {
    Ok(ParsedMarks {
        mark_1: parse_optional_mark(data.mark_1.as_ref(), max_mark)?,
        mark_2: parse_optional_mark(data.mark_2.as_ref(), max_mark)?,
        mark_3: parse_optional_mark(data.mark_3.as_ref(), max_mark)?,
        remedial_mark: parse_optional_mark(data.remedial_mark.as_ref(), max_mark)?,
    })
}

/// 录入成绩：按 (学生, 科目, 班级) 插入或更新，保存前重新计算平均分与状态
pub async fn save_grade(
    service: &GradeService,
    data: SaveGradeRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let policy = DynamicConfig::grade_policy().await;
    let marks = match parse_marks(&data, policy.max_mark) {
        Ok(marks) => marks,
        Err(msg) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::GradeInvalid, msg)));
        }
    };

    let storage = service.get_storage(request)?;
    let teacher = current_user(request)?;

    let Some(section) = storage
        .get_class_section_by_id(data.class_section_id)
        .await
        .map_err(storage_error("获取班级失败"))?
    else {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ClassSectionNotFound,
            "Class section not found",
        )));
    };

    let teaches = storage
        .teacher_teaches_section(teacher.id, data.subject_id, &section)
        .await
        .map_err(storage_error("校验任课失败"))?;
    if !teaches {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::GradeNotAllowed,
            "You do not teach this subject in this section",
        )));
    }

    let enrolled = storage
        .is_student_enrolled(data.student_id, section.id)
        .await
        .map_err(storage_error("校验学生注册失败"))?;
    if !enrolled {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::StudentNotEnrolled,
            "Student is not enrolled in this section",
        )));
    }

    let mut grade = storage
        .get_grade(data.student_id, data.subject_id, section.id)
        .await
        .map_err(storage_error("获取成绩失败"))?
        .unwrap_or_else(|| Grade::blank(data.student_id, data.subject_id, section.id));

    grade.mark_1 = marks.mark_1;
    grade.mark_2 = marks.mark_2;
    grade.mark_3 = marks.mark_3;
    grade.remedial_mark = marks.remedial_mark;
    grade.updated_by = Some(teacher.id);
    grade.recompute(&policy);

    let grade = storage
        .save_grade(grade)
        .await
        .map_err(storage_error("保存成绩失败"))?;

    tracing::info!(
        "Teacher {} saved grade for student {} in subject {} ({})",
        teacher.id,
        grade.student_id,
        grade.subject_id,
        grade.final_status
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        SaveGradeResponse {
            final_status: grade.final_status,
            final_average: grade.final_average,
            display_average: grade.display_average(),
            grade,
        },
        "Grade saved successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::grades::requests::MarkInput;

    fn request(mark_1: Option<MarkInput>) -> SaveGradeRequest {
        SaveGradeRequest {
            student_id: 1,
            subject_id: 2,
            class_section_id: 3,
            mark_1,
            mark_2: Some(MarkInput::Text("".into())),
            mark_3: Some(MarkInput::Number(11.0)),
            remedial_mark: None,
        }
    }

    #[test]
    fn test_parse_marks_clamps_and_clears() {
        let marks = parse_marks(&request(Some(MarkInput::Text("7,5".into()))), 10.0).unwrap();
        assert_eq!(marks.mark_1, Some(7.5));
        assert_eq!(marks.mark_2, None);
        assert_eq!(marks.mark_3, Some(10.0));
        assert_eq!(marks.remedial_mark, None);
    }

    #[test]
    fn test_parse_marks_rejects_negative() {
        assert!(parse_marks(&request(Some(MarkInput::Number(-2.0))), 10.0).is_err());
    }
}
