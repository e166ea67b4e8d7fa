use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::auth::responses::ProfileResponse;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, storage_error};

use super::AuthService;

/// 个人主页：学生附带班级，教师附带任课
pub async fn handle_get_profile(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let current = current_user(request)?;

    // 缓存中的用户可能已过时，主页以存储为准
    let user = match storage
        .get_user_by_id(current.id)
        .await
        .map_err(storage_error("获取个人信息失败"))?
    {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::UserNotFound,
                "User not found",
            )));
        }
    };

    let enrollments = if user.role == UserRole::Student {
        storage
            .list_student_enrollments(user.id)
            .await
            .map_err(storage_error("获取注册信息失败"))?
    } else {
        Vec::new()
    };

    let assignments = if user.role == UserRole::Teacher {
        storage
            .list_teacher_assignments(user.id)
            .await
            .map_err(storage_error("获取任课信息失败"))?
    } else {
        Vec::new()
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        ProfileResponse {
            user,
            enrollments,
            assignments,
        },
        "Profile retrieved successfully",
    )))
}
