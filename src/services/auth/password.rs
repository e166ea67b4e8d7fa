use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::auth::requests::ChangePasswordRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, forget_current_user, storage_error};
use crate::utils::password::{hash_password, verify_password};
use crate::utils::validate::validate_password_simple;

use super::AuthService;

/// 修改自己的密码，成功后清除临时密码标记
pub async fn handle_change_password(
    service: &AuthService,
    change_request: ChangePasswordRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let current = current_user(request)?;

    // 缓存中的用户不含密码哈希，重新读取
    let Some(user) = storage
        .get_user_by_id(current.id)
        .await
        .map_err(storage_error("修改密码失败"))?
    else {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "User not found",
        )));
    };

    if !verify_password(&change_request.old_password, &user.password_hash) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::PasswordChangeFailed,
            "Current password is incorrect",
        )));
    }

    if let Err(msg) = validate_password_simple(&change_request.new_password) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::UserPasswordInvalid,
            msg,
        )));
    }

    if change_request.old_password == change_request.new_password {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::UserPasswordInvalid,
            "New password must differ from the current one",
        )));
    }

    let password_hash = match hash_password(&change_request.new_password) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!("Password hashing failed: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Password change failed",
                )),
            );
        }
    };

    storage
        .update_user_password(user.id, &password_hash, false)
        .await
        .map_err(storage_error("修改密码失败"))?;

    forget_current_user(request).await;
    tracing::info!("User {} changed their password", user.username);

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
        "Password changed successfully",
    )))
}
