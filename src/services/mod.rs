pub mod auth;
pub mod class_sections;
pub mod courses;
pub mod dashboard;
pub mod files;
pub mod grades;
pub mod internships;
pub mod subjects;
pub mod system;
pub mod users;

pub use auth::AuthService;
pub use class_sections::ClassSectionService;
pub use courses::CourseService;
pub use dashboard::DashboardService;
pub use grades::GradeService;
pub use internships::InternshipService;
pub use subjects::SubjectService;
pub use system::SystemService;
pub use users::UserService;

use actix_web::{
    HttpRequest, HttpResponse, Result as ActixResult, error::InternalError, http::StatusCode, web,
};
use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::errors::CeepSystemError;
use crate::middlewares::{RequireJWT, require_jwt};
use crate::models::{ApiResponse, ErrorCode, users::entities::User};
use crate::storage::Storage;

/// 从应用数据中取出存储实例
pub(crate) fn storage_from_request(request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
    request
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| {
            tracing::error!("Storage not found in app data");
            reject(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::InternalServerError,
                "Storage unavailable",
            )
        })
}

/// 当前登录用户，由 RequireJWT 写入请求扩展
pub(crate) fn current_user(request: &HttpRequest) -> ActixResult<User> {
    RequireJWT::extract_user_claims(request).ok_or_else(|| {
        reject(
            StatusCode::UNAUTHORIZED,
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        )
    })
}

/// 清除当前请求 token 对应的用户缓存
pub(crate) async fn forget_current_user(request: &HttpRequest) {
    let Some(cache) = request.app_data::<web::Data<Arc<dyn ObjectCache>>>() else {
        return;
    };
    if let Some(token) = require_jwt::bearer_token(request.headers()) {
        cache.remove(&require_jwt::user_cache_key(token)).await;
    }
}

/// 管理员修改或删除账号后清空用户缓存，使状态变化立即生效
pub(crate) async fn invalidate_user_cache(request: &HttpRequest) {
    if let Some(cache) = request.app_data::<web::Data<Arc<dyn ObjectCache>>>() {
        cache.invalidate_all().await;
    }
}

/// 构造带统一响应体的 actix 错误
pub(crate) fn reject(status: StatusCode, code: ErrorCode, message: &str) -> actix_web::Error {
    InternalError::from_response(
        message.to_string(),
        HttpResponse::build(status).json(ApiResponse::<()>::error_empty(code, message)),
    )
    .into()
}

/// 存储层错误到 HTTP 状态码的映射
pub(crate) fn error_status(err: &CeepSystemError) -> (StatusCode, ErrorCode) {
    match err {
        CeepSystemError::Validation(_) => (StatusCode::BAD_REQUEST, ErrorCode::BadRequest),
        CeepSystemError::NotFound(_) => (StatusCode::NOT_FOUND, ErrorCode::NotFound),
        CeepSystemError::Conflict(_) | CeepSystemError::InvalidTransition(_) => {
            (StatusCode::CONFLICT, ErrorCode::Conflict)
        }
        CeepSystemError::Authentication(_) => (StatusCode::UNAUTHORIZED, ErrorCode::Unauthorized),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::InternalServerError,
        ),
    }
}

/// 用于 `map_err` 的存储错误转换，附带上下文
pub(crate) fn storage_error(context: &'static str) -> impl FnOnce(CeepSystemError) -> actix_web::Error {
    move |err| {
        let (status, code) = error_status(&err);
        if !err.is_client_error() {
            tracing::error!("{}: {}", context, err);
        }
        reject(status, code, &format!("{context}: {}", err.message()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(
            error_status(&CeepSystemError::conflict("dup")).0,
            StatusCode::CONFLICT
        );
        assert_eq!(
            error_status(&CeepSystemError::validation("bad")).0,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            error_status(&CeepSystemError::invalid_transition("order")).0,
            StatusCode::CONFLICT
        );
        assert_eq!(
            error_status(&CeepSystemError::database_operation("down")).0,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[actix_web::test]
    async fn test_reject_carries_json_body() {
        let err = reject(StatusCode::NOT_FOUND, ErrorCode::UserNotFound, "missing");
        let response = err.error_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
