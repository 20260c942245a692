//! 路由模块
//!
//! 包含路由组合与解析引擎的核心组件：
//! - 路由节点数据模型
//! - 自定义路由
//! - 路由源解析器
//! - 合并与分类
//! - 路由树解析
//! - 路由流水线

pub mod classify;
pub mod custom;
pub mod node;
pub mod parser;
pub mod pipeline;
pub mod resolve;

// 重导出常用类型
pub use classify::{classify, ensure_unique_names, sort_by_order, ClassifiedRoutes};
pub use custom::custom_routes;
pub use node::{ComponentKind, ComponentRef, RouteMeta, RouteNode};
pub use parser::{RouteParser, SourceFormat};
pub use pipeline::{RoutePipeline, RouterTree};
pub use resolve::{ensure_registered, missing_components, resolve, ResolvedRoute};
