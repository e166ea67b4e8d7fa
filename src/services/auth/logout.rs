use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::ApiResponse;
use crate::services::forget_current_user;
use crate::utils::jwt::JwtUtils;

/// 登出：让浏览器删除 refresh token cookie，并丢弃该访问令牌的用户缓存
pub async fn handle_logout(request: &HttpRequest) -> ActixResult<HttpResponse> {
    forget_current_user(request).await;

    Ok(HttpResponse::Ok()
        .cookie(JwtUtils::create_empty_refresh_token_cookie())
        .json(ApiResponse::<()>::success_empty("Logout successful")))
}
