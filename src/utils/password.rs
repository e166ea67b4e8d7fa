//! Argon2id 口令哈希

use crate::config::AppConfig;
use crate::errors::CeepSystemError;
use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};

fn configured_hasher() -> Result<Argon2<'static>, CeepSystemError> {
    let cfg = &AppConfig::get().argon2;
    let params = Params::new(cfg.memory_cost, cfg.time_cost, cfg.parallelism, None)
        .map_err(|e| CeepSystemError::validation(format!("Argon2 参数错误: {e}")))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// 用配置中的参数生成 PHC 格式哈希
pub fn hash_password(password: &str) -> Result<String, CeepSystemError> {
    let salt = SaltString::generate(&mut OsRng);
    configured_hasher()?
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| CeepSystemError::validation(format!("密码哈希失败: {e}")))
}

/// 校验口令；参数取自哈希串本身，旧参数生成的哈希仍然有效
pub fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash).is_ok_and(|parsed| {
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hash = hash_password("Senha123#").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("Senha123#", &hash));
        assert!(!verify_password("senha123#", &hash));
    }

    #[test]
    fn test_malformed_hash_never_verifies() {
        assert!(!verify_password("anything", "not-a-phc-string"));
    }
}
