//! 应用配置
//!
//! 配置加载顺序：`config.toml` -> `config.{APP_ENV}.toml` -> `CEEP_*` 环境变量 -> 显式覆盖变量。

mod r#impl;
mod structs;

pub use structs::*;
