//! 运行时设置
//!
//! 启动时从 `system_settings` 表载入，管理员修改后原地更新。
//! 数据库里缺失或无法解析的值回退到 `AppConfig`。

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::str::FromStr;
use tokio::sync::RwLock;

use crate::config::AppConfig;
use crate::models::grades::entities::GradePolicy;

static SETTINGS: Lazy<RwLock<HashMap<String, String>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

pub struct DynamicConfig;

impl DynamicConfig {
    /// 用数据库中的全部设置替换当前内容
    pub async fn init(settings: Vec<(String, String)>) {
        let mut guard = SETTINGS.write().await;
        *guard = settings.into_iter().collect();
        tracing::info!("Loaded {} runtime settings", guard.len());
    }

    pub async fn update(key: &str, value: &str) {
        SETTINGS
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        tracing::debug!("Runtime setting changed: {} = {}", key, value);
    }

    async fn raw(key: &str) -> Option<String> {
        SETTINGS.read().await.get(key).cloned()
    }

    async fn parsed<T: FromStr>(key: &str) -> Option<T> {
        Self::raw(key).await?.trim().parse().ok()
    }

    pub async fn system_name() -> String {
        Self::raw("app.system_name")
            .await
            .unwrap_or_else(|| AppConfig::get().app.system_name.clone())
    }

    /// 分钟
    pub async fn access_token_expiry() -> i64 {
        Self::parsed("jwt.access_token_expiry")
            .await
            .unwrap_or(AppConfig::get().jwt.access_token_expiry)
    }

    /// 天
    pub async fn refresh_token_expiry() -> i64 {
        Self::parsed("jwt.refresh_token_expiry")
            .await
            .unwrap_or(AppConfig::get().jwt.refresh_token_expiry)
    }

    /// 天
    pub async fn refresh_token_remember_me_expiry() -> i64 {
        Self::parsed("jwt.refresh_token_remember_me_expiry")
            .await
            .unwrap_or(AppConfig::get().jwt.refresh_token_remember_me_expiry)
    }

    pub async fn upload_max_size() -> usize {
        Self::parsed("upload.max_size")
            .await
            .unwrap_or(AppConfig::get().upload.max_size)
    }

    /// 允许的扩展名，数据库中以 JSON 数组保存
    pub async fn upload_allowed_types() -> Vec<String> {
        Self::raw("upload.allowed_types")
            .await
            .and_then(|v| serde_json::from_str(&v).ok())
            .unwrap_or_else(|| AppConfig::get().upload.allowed_types.clone())
    }

    pub async fn passing_average() -> f64 {
        Self::parsed::<f64>("grades.passing_average")
            .await
            .filter(|v| v.is_finite())
            .unwrap_or(AppConfig::get().school.passing_average)
    }

    pub async fn max_mark() -> f64 {
        Self::parsed::<f64>("grades.max_mark")
            .await
            .filter(|v| v.is_finite() && *v > 0.0)
            .unwrap_or(AppConfig::get().school.max_mark)
    }

    pub async fn grade_policy() -> GradePolicy {
        GradePolicy {
            passing_average: Self::passing_average().await,
            max_mark: Self::max_mark().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 全局状态，只在一个测试里读写
    #[tokio::test]
    async fn test_values_parse_from_loaded_settings() {
        DynamicConfig::init(vec![
            ("grades.passing_average".into(), " 6 ".into()),
            ("upload.max_size".into(), "2048".into()),
            ("upload.allowed_types".into(), r#"[".pdf"]"#.into()),
        ])
        .await;

        assert_eq!(DynamicConfig::parsed::<f64>("grades.passing_average").await, Some(6.0));
        assert_eq!(DynamicConfig::upload_max_size().await, 2048);
        assert_eq!(DynamicConfig::upload_allowed_types().await, vec![".pdf"]);

        DynamicConfig::update("upload.max_size", "oops").await;
        assert_eq!(DynamicConfig::parsed::<usize>("upload.max_size").await, None);
    }
}
