//! # Admin Routes - 管理后台路由组合引擎
//!
//! 管理后台的路由定义层，负责把手写的自定义路由与构建工具生成的路由合并成
//! 可交给路由运行时挂载的路由树：
//!
//! - **路由模型**: 带符号化组件引用（`layout.X` / `view.Y`）的路由节点
//! - **组件注册表**: 布局与视图两张独立的键到加载器映射，加载器可就绪或延迟
//! - **合并与分类**: 按顶层 `meta.constant` 把路由划分为常量路由与权限路由
//! - **路由解析**: 把符号化引用替换为具体加载器，缺失即失败
//! - **配置与日志**: YAML / JSON 配置加载，基于 tracing 的结构化日志
//!
//! ## 快速开始
//!
//! ```rust,no_run
//! use admin_routes::{console_registry, RoutePipeline, RoutesConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pipeline = RoutePipeline::new(RoutesConfig::default());
//!     let generated = pipeline.load_generated().await?;
//!
//!     let tree = pipeline.build(generated, console_registry())?;
//!     println!("权限路由 {} 条", tree.auth_routes.len());
//!     Ok(())
//! }
//! ```
//!
//! ## 模块结构
//!
//! - `route` - 路由模型、合并分类、解析与流水线
//! - `component` - 组件加载器与注册表
//! - `core` - 应用配置
//! - `utils` - 错误类型与日志系统

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod component;
pub mod core;
pub mod route;
pub mod utils;

// 重导出常用类型，方便使用
pub use route::{
    classify, custom_routes, ensure_registered, ensure_unique_names, missing_components, resolve,
    sort_by_order, ClassifiedRoutes, ComponentKind, ComponentRef, ResolvedRoute, RouteMeta, RouteNode,
    RouteParser, RoutePipeline, RouterTree, SourceFormat,
};

pub use component::{
    console_registry, Component, ComponentLoader, ComponentRegistry, ComponentRegistryBuilder,
    LoadComponent,
};

pub use utils::{error_code, Result, RouteError};
pub use utils::logger::{LogGuard, Logger, LoggerConfig, LoggerConfigBuilder, RotationStrategy};

pub use core::config::{AppConfig, AppConfigBuilder, LogConfig, RoutesConfig};

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
