//! CEEP System - 学校教务与实习管理后端服务
//!
//! 基于 Actix Web 构建，覆盖账号、课程班级、成绩录入和实习文档签署流程。
//!
//! # 架构
//! - `cache`: 缓存层（Moka/Redis）
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `middlewares`: 认证授权与限流中间件
//! - `models`: 数据模型定义，含实习文档流程规则
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理与初始数据
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod cache;
pub mod config;
pub mod entity;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
