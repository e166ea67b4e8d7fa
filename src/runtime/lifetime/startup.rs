use crate::cache::{
    ObjectCache,
    register::{get_object_cache_plugin, registered_backends},
};
use crate::config::AppConfig;
use crate::errors::{CeepSystemError, Result};
use crate::services::system::DynamicConfig;
use crate::storage::Storage;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::seed;

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
}

/// 按名称构造缓存后端
async fn build_cache(name: &str) -> Option<Arc<dyn ObjectCache>> {
    let Some(constructor) = get_object_cache_plugin(name) else {
        warn!("Cache backend '{}' not found in registry", name);
        return None;
    };
    match constructor().await {
        Ok(cache) => {
            info!("Created {} cache backend", name);
            Some(Arc::from(cache))
        }
        Err(e) => {
            warn!("Failed to create {} cache: {}", name, e);
            None
        }
    }
}

/// 创建缓存实例，配置的后端不可用时回退到内存缓存
async fn create_cache() -> Result<Arc<dyn ObjectCache>> {
    let cache_type = &AppConfig::get().cache.cache_type;
    debug!("Creating {} cache backend", cache_type);

    if let Some(cache) = build_cache(cache_type).await {
        return Ok(cache);
    }
    if cache_type != "moka" {
        warn!("Falling back to memory cache");
        if let Some(cache) = build_cache("moka").await {
            return Ok(cache);
        }
    }

    Err(CeepSystemError::cache_connection(format!(
        "No cache backend available (tried: {cache_type})"
    )))
}

/// 从数据库加载运行时配置，失败时回退到 AppConfig
async fn init_dynamic_config(storage: &Arc<dyn Storage>) {
    match storage.list_all_settings().await {
        Ok(settings) => {
            let settings_vec: Vec<(String, String)> =
                settings.into_iter().map(|s| (s.key, s.value)).collect();
            DynamicConfig::init(settings_vec).await;
        }
        Err(e) => {
            warn!(
                "Failed to load dynamic config from database: {}, using defaults",
                e
            );
            DynamicConfig::init(vec![]).await;
        }
    }
}

/// 准备服务器启动的上下文：存储、运行时配置、初始数据和缓存
pub async fn prepare_server_startup() -> Result<StartupContext> {
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        debug!("rustls crypto provider already installed");
    }

    debug!("Registered cache backends: {:?}", registered_backends());

    let storage = crate::storage::create_storage().await?;
    info!("Storage backend initialized and migrations completed");

    init_dynamic_config(&storage).await;

    // 初始数据失败不阻止启动
    if let Err(e) = seed::seed_admin(&storage).await {
        warn!("Failed to seed admin account: {}", e);
    }
    if AppConfig::get().school.seed_catalog
        && let Err(e) = seed::seed_catalog(&storage).await
    {
        warn!("Failed to seed catalog: {}", e);
    }

    let cache = create_cache().await?;
    info!("Cache backend initialized");

    Ok(StartupContext { storage, cache })
}
