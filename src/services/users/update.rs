use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::common::{add_assignments, find_with_role, validated_personal};
use super::{STAFF_ROLES, UserService};
use crate::models::{
    ApiResponse, ErrorCode,
    enrollments::requests::SetEnrollment,
    users::{
        entities::UserRole,
        requests::{
            StaffKind, UpdateStaffRequest, UpdateStudentRequest, UpdateTeacherRequest, UserUpdate,
        },
        responses::{StudentDetailResponse, TeacherDetailResponse, UserResponse},
    },
};
use crate::services::{invalidate_user_cache, storage_error};

fn user_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::UserNotFound,
        "User not found",
    ))
}

/// 更新教师资料，并按请求删除、新增任课
pub async fn update_teacher(
    service: &UserService,
    user_id: i64,
    data: UpdateTeacherRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    find_with_role(&storage, user_id, &[UserRole::Teacher]).await?;
    let personal = validated_personal(data.personal)?;

    let update = UserUpdate {
        personal: Some(personal),
        status: data.status,
        ..Default::default()
    };
    let Some(user) = storage
        .update_user(user_id, update)
        .await
        .map_err(storage_error("Failed to update teacher"))?
    else {
        return Ok(user_not_found());
    };

    // 先删后增，便于在同一次请求中替换任课
    if !data.remove_assignment_ids.is_empty() {
        let removed = storage
            .delete_teacher_assignments(user.id, &data.remove_assignment_ids)
            .await
            .map_err(storage_error("删除任课失败"))?;
        tracing::debug!("Removed {} assignments from teacher {}", removed, user.id);
    }
    add_assignments(&storage, user.id, data.add_assignments).await?;

    let assignments = storage
        .list_teacher_assignments(user.id)
        .await
        .map_err(storage_error("获取任课信息失败"))?;

    invalidate_user_cache(request).await;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        TeacherDetailResponse { user, assignments },
        "Teacher updated successfully",
    )))
}

/// 更新学生资料，更换班级时替换原有注册
pub async fn update_student(
    service: &UserService,
    user_id: i64,
    data: UpdateStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    find_with_role(&storage, user_id, &[UserRole::Student]).await?;
    let personal = validated_personal(data.personal)?;

    if let Some(section_id) = data.class_section_id {
        let section = storage
            .get_class_section_by_id(section_id)
            .await
            .map_err(storage_error("获取班级失败"))?;
        if section.is_none() {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ClassSectionNotFound,
                "Class section not found",
            )));
        }
    }

    let update = UserUpdate {
        personal: Some(personal),
        status: data.status,
        ..Default::default()
    };
    let Some(user) = storage
        .update_user(user_id, update)
        .await
        .map_err(storage_error("Failed to update student"))?
    else {
        return Ok(user_not_found());
    };

    if let Some(class_section_id) = data.class_section_id {
        storage
            .set_student_enrollment(SetEnrollment {
                student_id: user.id,
                class_section_id,
                enrolled_on: chrono::Utc::now().date_naive(),
            })
            .await
            .map_err(storage_error("Enrollment failed"))?;
    }

    let enrollments = storage
        .list_student_enrollments(user.id)
        .await
        .map_err(storage_error("获取注册信息失败"))?;

    invalidate_user_cache(request).await;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        StudentDetailResponse { user, enrollments },
        "Student updated successfully",
    )))
}

/// 更新行政人员，可切换职员/领导层；领导层的专业方向总是清空
pub async fn update_staff(
    service: &UserService,
    user_id: i64,
    data: UpdateStaffRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let existing = find_with_role(&storage, user_id, STAFF_ROLES).await?;
    let personal = validated_personal(data.personal)?;

    let kind = data
        .kind
        .or_else(|| StaffKind::from_role(existing.role))
        .unwrap_or(StaffKind::Staff);
    let eixo = if kind.keeps_eixo() { data.eixo } else { None };

    let update = UserUpdate {
        personal: Some(personal),
        status: data.status,
        role: Some(kind.role()),
        eixo: Some(eixo),
    };
    let Some(user) = storage
        .update_user(user_id, update)
        .await
        .map_err(storage_error("Failed to update staff member"))?
    else {
        return Ok(user_not_found());
    };

    invalidate_user_cache(request).await;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        UserResponse { user },
        "Staff member updated successfully",
    )))
}
