//! 访问令牌与刷新令牌
//!
//! 两种令牌用同一密钥签名，靠 `token_type` 区分，刷新令牌只通过
//! HttpOnly cookie 下发，作用路径限定在 `/api/v1/auth`。

use crate::config::AppConfig;
use actix_web::cookie::{Cookie, SameSite, time::Duration as CookieDuration};
use chrono::{Duration, Utc};
use jsonwebtoken::{
    DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::{Error as JwtError, ErrorKind},
};
use serde::{Deserialize, Serialize};

const REFRESH_COOKIE_NAME: &str = "ceep_refresh_token";
const REFRESH_COOKIE_PATH: &str = "/api/v1/auth";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // 用户 ID
    pub role: String,
    pub token_type: TokenKind,
    pub exp: usize,
    pub iat: usize,
}

impl Claims {
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

pub struct JwtUtils;

impl JwtUtils {
    fn secret() -> &'static [u8] {
        AppConfig::get().jwt.secret.as_bytes()
    }

    /// 签发指定类型和有效期的令牌
    pub fn issue(user_id: i64, role: &str, kind: TokenKind, ttl: Duration) -> Result<String, JwtError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            role: role.to_string(),
            token_type: kind,
            exp: (now + ttl).timestamp() as usize,
            iat: now.timestamp() as usize,
        };
        encode(&Header::default(), &claims, &EncodingKey::from_secret(Self::secret()))
    }

    pub fn generate_token_pair(
        user_id: i64,
        role: &str,
        access_ttl: Duration,
        refresh_ttl: Duration,
    ) -> Result<TokenPair, JwtError> {
        Ok(TokenPair {
            access_token: Self::issue(user_id, role, TokenKind::Access, access_ttl)?,
            refresh_token: Self::issue(user_id, role, TokenKind::Refresh, refresh_ttl)?,
        })
    }

    /// 校验签名、有效期和令牌类型
    pub fn verify(token: &str, expected: TokenKind) -> Result<Claims, JwtError> {
        let claims = decode::<Claims>(
            token,
            &DecodingKey::from_secret(Self::secret()),
            &Validation::default(),
        )?
        .claims;
        if claims.token_type != expected {
            return Err(ErrorKind::InvalidToken.into());
        }
        Ok(claims)
    }

    pub fn verify_access_token(token: &str) -> Result<Claims, JwtError> {
        Self::verify(token, TokenKind::Access)
    }

    pub fn verify_refresh_token(token: &str) -> Result<Claims, JwtError> {
        Self::verify(token, TokenKind::Refresh)
    }

    fn refresh_cookie(value: String, max_age: CookieDuration) -> Cookie<'static> {
        Cookie::build(REFRESH_COOKIE_NAME, value)
            .path(REFRESH_COOKIE_PATH)
            .max_age(max_age)
            .same_site(SameSite::Strict)
            .http_only(true)
            .secure(AppConfig::get().is_production())
            .finish()
    }

    /// 与刷新令牌同寿命的 cookie
    pub fn create_refresh_token_cookie(refresh_token: &str, expiry_days: i64) -> Cookie<'static> {
        Self::refresh_cookie(refresh_token.to_string(), CookieDuration::days(expiry_days))
    }

    /// 立即过期的空 cookie，用于登出
    pub fn create_empty_refresh_token_cookie() -> Cookie<'static> {
        Self::refresh_cookie(String::new(), CookieDuration::ZERO)
    }

    pub fn extract_refresh_token_from_cookie(req: &actix_web::HttpRequest) -> Option<String> {
        req.cookie(REFRESH_COOKIE_NAME)
            .map(|cookie| cookie.value().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_token_round_trip() {
        let token = JwtUtils::issue(17, "teacher", TokenKind::Access, Duration::minutes(5)).unwrap();
        let claims = JwtUtils::verify_access_token(&token).unwrap();
        assert_eq!(claims.user_id(), Some(17));
        assert_eq!(claims.role, "teacher");
    }

    #[test]
    fn test_token_kinds_are_not_interchangeable() {
        let pair =
            JwtUtils::generate_token_pair(3, "student", Duration::minutes(5), Duration::days(1))
                .unwrap();
        assert!(JwtUtils::verify_refresh_token(&pair.access_token).is_err());
        assert!(JwtUtils::verify_access_token(&pair.refresh_token).is_err());
        assert!(JwtUtils::verify_refresh_token(&pair.refresh_token).is_ok());
    }

    #[test]
    fn test_expired_token_rejected() {
        // 超过默认 60 秒容差
        let token = JwtUtils::issue(1, "admin", TokenKind::Access, Duration::minutes(-5)).unwrap();
        assert!(JwtUtils::verify_access_token(&token).is_err());
    }

    #[test]
    fn test_logout_cookie_expires_immediately() {
        let cookie = JwtUtils::create_empty_refresh_token_cookie();
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(CookieDuration::ZERO));
        assert_eq!(cookie.path(), Some(REFRESH_COOKIE_PATH));
    }
}
