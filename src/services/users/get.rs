use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::common::find_with_role;
use super::{STAFF_ROLES, UserService};
use crate::models::ApiResponse;
use crate::models::users::{
    entities::UserRole,
    responses::{StudentDetailResponse, TeacherDetailResponse, UserResponse},
};
use crate::services::storage_error;

pub async fn get_teacher(
    service: &UserService,
    user_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = find_with_role(&storage, user_id, &[UserRole::Teacher]).await?;

    let assignments = storage
        .list_teacher_assignments(user.id)
        .await
        .map_err(storage_error("获取任课信息失败"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        TeacherDetailResponse { user, assignments },
        "Teacher retrieved successfully",
    )))
}

pub async fn get_student(
    service: &UserService,
    user_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = find_with_role(&storage, user_id, &[UserRole::Student]).await?;

    let enrollments = storage
        .list_student_enrollments(user.id)
        .await
        .map_err(storage_error("获取注册信息失败"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        StudentDetailResponse { user, enrollments },
        "Student retrieved successfully",
    )))
}

pub async fn get_staff(
    service: &UserService,
    user_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = find_with_role(&storage, user_id, STAFF_ROLES).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        UserResponse { user },
        "Staff member retrieved successfully",
    )))
}
