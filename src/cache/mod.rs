//! 缓存层
//!
//! 通过插件注册表选择后端（`moka` 进程内缓存或 `redis`），
//! 插件在程序加载时由 `declare_object_cache_plugin!` 自动注册。

pub mod object_cache;
pub mod register;
pub mod traits;

pub use traits::{CacheResult, ObjectCache};

/// 声明并注册一个对象缓存插件
///
/// 目标类型需要提供 `fn new() -> Result<Self, String>` 并实现 [`ObjectCache`]。
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:literal, $ty:ty) => {
        #[ctor::ctor]
        fn __register_object_cache_plugin() {
            $crate::cache::register::register_object_cache_plugin(
                $name,
                std::sync::Arc::new(|| {
                    Box::pin(async {
                        <$ty>::new()
                            .map(|cache| Box::new(cache) as Box<dyn $crate::cache::ObjectCache>)
                            .map_err($crate::errors::CeepSystemError::cache_connection)
                    })
                }),
            );
        }
    };
}
