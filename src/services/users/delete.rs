use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use super::common::{client_ip, find_with_role};
use crate::models::{ApiResponse, ErrorCode, users::entities::UserRole};
use crate::services::{current_user, invalidate_user_cache, storage_error};

/// 删除指定角色的用户，ID 属于其他角色时返回 404
pub async fn delete_user_with_roles(
    service: &UserService,
    user_id: i64,
    roles: &[UserRole],
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let admin = current_user(request)?;

    if admin.id == user_id {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::UserDeleteFailed,
            "Cannot delete current user",
        )));
    }

    let user = find_with_role(&storage, user_id, roles).await?;

    let deleted = storage
        .delete_user(user.id)
        .await
        .map_err(storage_error("User deletion failed"))?;
    if !deleted {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "User not found",
        )));
    }

    invalidate_user_cache(request).await;
    tracing::info!(
        "Admin {} deleted {} {} from {}",
        admin.username,
        user.role,
        user.username,
        client_ip(request)
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("User deleted successfully")))
}
