use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{
    ApiResponse, ErrorCode,
    auth::{requests::LoginRequest, responses::LoginResponse},
};
use crate::services::storage_error;
use crate::services::system::DynamicConfig;
use crate::utils::jwt;
use crate::utils::password::verify_password;

use super::AuthService;

fn invalid_credentials() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(
        ErrorCode::AuthFailed,
        "Invalid credentials",
    ))
}

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    // 1. 按学号 / 用户名（管理员还可用名或姓）查找用户
    let user = storage
        .find_user_for_login(&login_request.identifier)
        .await
        .map_err(storage_error("Login failed"))?;

    let Some(user) = user else {
        return Ok(invalid_credentials());
    };

    // 2. 验证密码，停用账号与密码错误返回相同的提示
    if !verify_password(&login_request.password, &user.password_hash) {
        return Ok(invalid_credentials());
    }
    if !user.is_active() {
        tracing::info!("Inactive user {} attempted to login", user.username);
        return Ok(invalid_credentials());
    }

    // 3. 更新最后登录时间
    if let Err(e) = storage.update_last_login(user.id).await {
        tracing::warn!("Failed to update last login for {}: {}", user.username, e);
    }

    // 4. 生成令牌对
    let refresh_days = if login_request.remember_me {
        DynamicConfig::refresh_token_remember_me_expiry().await
    } else {
        DynamicConfig::refresh_token_expiry().await
    };
    let access_minutes = DynamicConfig::access_token_expiry().await;
    let token_pair = match user.generate_token_pair(
        chrono::Duration::minutes(access_minutes),
        chrono::Duration::days(refresh_days),
    ) {
        Ok(pair) => pair,
        Err(e) => {
            tracing::error!("Failed to generate JWT token: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Login failed, unable to generate token",
                )),
            );
        }
    };

    tracing::info!("User {} logged in successfully", user.username);

    let response = LoginResponse {
        access_token: token_pair.access_token,
        expires_in: access_minutes * 60, // 秒
        must_change_password: user.must_change_password,
        dashboard: user.role.dashboard_path().to_string(),
        user,
        created_at: chrono::Utc::now(),
    };

    // 5. 创建 refresh token cookie
    let refresh_cookie =
        jwt::JwtUtils::create_refresh_token_cookie(&token_pair.refresh_token, refresh_days);

    Ok(HttpResponse::Ok()
        .cookie(refresh_cookie)
        .json(ApiResponse::success(response, "Login successful")))
}
