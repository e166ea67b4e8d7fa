//! 角色校验中间件
//!
//! 必须挂在 RequireJWT 之内，从请求扩展读取已认证用户，角色不在允许列表中时返回 403：
//!
//! ```rust,ignore
//! web::scope("/api/v1/teachers")
//!     .wrap(RequireJWT)
//!     .service(
//!         web::scope("")
//!             .wrap(RequireRole::new_any(UserRole::admin_roles()))
//!             .route("", web::get().to(list_teachers)),
//!     )
//! ```

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::info;

use crate::models::{
    ErrorCode,
    users::entities::{User, UserRole},
};

use super::create_error_response;

#[derive(Clone)]
pub struct RequireRole {
    allowed: Rc<[UserRole]>,
}

impl RequireRole {
    /// 允许列表中任一角色通过
    pub fn new_any(roles: &[&UserRole]) -> Self {
        Self {
            allowed: roles.iter().map(|r| **r).collect(),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleMiddleware {
            service: Rc::new(service),
            allowed: self.allowed.clone(),
        }))
    }
}

pub struct RequireRoleMiddleware<S> {
    service: Rc<S>,
    allowed: Rc<[UserRole]>,
}

impl<S, B> Service<ServiceRequest> for RequireRoleMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let allowed = self.allowed.clone();

        Box::pin(async move {
            let identity = req
                .extensions()
                .get::<User>()
                .map(|user| (user.id, user.role));

            let (status, code, message) = match identity {
                Some((_, role)) if allowed.contains(&role) => {
                    return Ok(srv.call(req).await?.map_into_left_body());
                }
                Some((user_id, role)) => {
                    info!(
                        "Access denied for user {} ({}) on {}, allowed roles: {:?}",
                        user_id,
                        role,
                        req.path(),
                        allowed
                    );
                    (
                        StatusCode::FORBIDDEN,
                        ErrorCode::Forbidden,
                        "Access denied for this profile",
                    )
                }
                None => {
                    info!("Role check on {} without an authenticated user", req.path());
                    (
                        StatusCode::UNAUTHORIZED,
                        ErrorCode::Unauthorized,
                        "Authentication required",
                    )
                }
            };

            Ok(req.into_response(
                create_error_response(status, code, message).map_into_right_body(),
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::{PersonalData, UserStatus};
    use actix_web::{App, HttpResponse, test, web};

    fn user_with_role(role: UserRole) -> User {
        let now = chrono::Utc::now();
        User {
            id: 7,
            username: "20250007".into(),
            enrollment_number: "20250007".into(),
            password_hash: String::new(),
            role,
            status: UserStatus::Active,
            eixo: None,
            personal: PersonalData::default(),
            must_change_password: false,
            last_login: None,
            created_at: now,
            updated_at: now,
        }
    }

    async fn status_for(role: Option<UserRole>) -> StatusCode {
        let app = test::init_service(
            App::new().service(
                web::scope("/admin")
                    .wrap(RequireRole::new_any(UserRole::internship_manager_roles()))
                    .wrap_fn(move |req, srv| {
                        if let Some(role) = role {
                            req.extensions_mut().insert(user_with_role(role));
                        }
                        srv.call(req)
                    })
                    .route("", web::get().to(HttpResponse::Ok)),
            ),
        )
        .await;

        let req = test::TestRequest::get().uri("/admin").to_request();
        test::call_service(&app, req).await.status()
    }

    #[actix_web::test]
    async fn test_role_check_without_user_is_unauthorized() {
        assert_eq!(status_for(None).await, StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_role_outside_allowed_list_is_forbidden() {
        assert_eq!(status_for(Some(UserRole::Teacher)).await, StatusCode::FORBIDDEN);
        assert_eq!(status_for(Some(UserRole::Staff)).await, StatusCode::OK);
    }
}
