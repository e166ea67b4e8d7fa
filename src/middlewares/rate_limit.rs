/*!
 * 速率限制中间件
 *
 * 登录、令牌刷新和实习文件上传各自维护一个计数窗口。
 * 已认证请求按用户计数，匿名请求按客户端地址计数。
 *
 * ```rust,ignore
 * web::resource("/login")
 *     .wrap(RateLimit::login())
 *     .route(web::post().to(login));
 * ```
 *
 * 超出次数返回 429，并带 `Retry-After` 头。
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    http::header::{HeaderName, HeaderValue, RETRY_AFTER},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use moka::future::Cache;
use once_cell::sync::Lazy;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

use super::create_error_response;
use crate::models::{ErrorCode, users::entities::User};

const LIMIT_HEADER: HeaderName = HeaderName::from_static("x-ratelimit-limit");
const REMAINING_HEADER: HeaderName = HeaderName::from_static("x-ratelimit-remaining");

/// 一类端点的限流窗口，计数随窗口过期
pub struct Window {
    scope: &'static str,
    limit: u32,
    period: Duration,
    counters: Cache<String, u32>,
}

impl Window {
    fn new(scope: &'static str, limit: u32, period_secs: u64) -> Self {
        let period = Duration::from_secs(period_secs);
        Self {
            scope,
            limit,
            period,
            counters: Cache::builder()
                .time_to_live(period)
                .max_capacity(50_000)
                .build(),
        }
    }

    /// 记录一次请求，返回剩余次数；已超限时返回 None
    async fn hit(&self, who: &str) -> Option<u32> {
        let key = format!("{}:{}", self.scope, who);
        let used = self.counters.get(&key).await.unwrap_or(0);
        if used >= self.limit {
            warn!(
                "Rate limit exceeded: scope={} who={} ({}/{})",
                self.scope, who, used, self.limit
            );
            return None;
        }
        self.counters.insert(key, used + 1).await;
        Some(self.limit - used - 1)
    }
}

// 各 worker 共享同一组计数
static LOGIN_WINDOW: Lazy<Arc<Window>> = Lazy::new(|| Arc::new(Window::new("login", 5, 60)));
static REFRESH_WINDOW: Lazy<Arc<Window>> =
    Lazy::new(|| Arc::new(Window::new("refresh", 10, 60)));
static UPLOAD_WINDOW: Lazy<Arc<Window>> = Lazy::new(|| Arc::new(Window::new("upload", 10, 60)));

#[derive(Clone)]
pub struct RateLimit {
    window: Arc<Window>,
}

impl RateLimit {
    /// 登录：每个来源每分钟 5 次
    pub fn login() -> Self {
        Self {
            window: LOGIN_WINDOW.clone(),
        }
    }

    /// 刷新令牌：每分钟 10 次
    pub fn refresh_token() -> Self {
        Self {
            window: REFRESH_WINDOW.clone(),
        }
    }

    /// 实习附件和主管 PDF 上传：每个用户每分钟 10 次
    pub fn file_upload() -> Self {
        Self {
            window: UPLOAD_WINDOW.clone(),
        }
    }
}

/// 计数主体：登录用户用 ID，否则用连接信息里的客户端地址
fn requester_of(req: &ServiceRequest) -> String {
    if let Some(id) = req.extensions().get::<User>().map(|user| user.id) {
        return format!("user:{id}");
    }
    let info = req.connection_info();
    let addr = info.realip_remote_addr().unwrap_or("unknown");
    // 去掉端口，同一主机的不同连接计入同一窗口
    let host = addr
        .parse::<std::net::SocketAddr>()
        .map(|sock| sock.ip().to_string())
        .unwrap_or_else(|_| addr.to_string());
    format!("ip:{host}")
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            window: self.window.clone(),
        }))
    }
}

pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    window: Arc<Window>,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_service::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let window = self.window.clone();

        Box::pin(async move {
            let who = requester_of(&req);

            let Some(remaining) = window.hit(&who).await else {
                let mut response = create_error_response(
                    StatusCode::TOO_MANY_REQUESTS,
                    ErrorCode::RateLimitExceeded,
                    "Too many requests, please try again later",
                );
                let headers = response.headers_mut();
                headers.insert(RETRY_AFTER, HeaderValue::from(window.period.as_secs()));
                headers.insert(REMAINING_HEADER, HeaderValue::from_static("0"));
                return Ok(req.into_response(response.map_into_right_body()));
            };

            let mut res = srv.call(req).await?;
            let headers = res.headers_mut();
            headers.insert(LIMIT_HEADER, HeaderValue::from(window.limit));
            headers.insert(REMAINING_HEADER, HeaderValue::from(remaining));
            Ok(res.map_into_left_body())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, HttpResponse, test, web};

    #[actix_web::test]
    async fn test_window_counts_per_requester() {
        let window = Window::new("test", 2, 60);
        assert_eq!(window.hit("ip:10.0.0.1").await, Some(1));
        assert_eq!(window.hit("ip:10.0.0.1").await, Some(0));
        assert_eq!(window.hit("ip:10.0.0.1").await, None);
        // 其他来源不受影响
        assert_eq!(window.hit("ip:10.0.0.2").await, Some(1));
    }

    #[actix_web::test]
    async fn test_exceeding_limit_returns_429() {
        let limiter = RateLimit {
            window: Arc::new(Window::new("probe", 1, 30)),
        };
        let app = test::init_service(
            App::new().service(
                web::resource("/probe")
                    .wrap(limiter)
                    .route(web::post().to(|| async { HttpResponse::Ok().finish() })),
            ),
        )
        .await;

        let first = test::call_service(
            &app,
            test::TestRequest::post().uri("/probe").to_request(),
        )
        .await;
        assert_eq!(first.status(), StatusCode::OK);
        assert_eq!(first.headers().get(REMAINING_HEADER).unwrap(), "0");

        let second = test::call_service(
            &app,
            test::TestRequest::post().uri("/probe").to_request(),
        )
        .await;
        assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(second.headers().get(RETRY_AFTER).unwrap(), "30");
    }
}
