//! 组件注册模块
//!
//! 包含符号化组件注册表的核心组件：
//! - 组件加载器（就绪 / 延迟）
//! - 布局与视图注册表

pub mod loader;
pub mod registry;

// 重导出常用类型
pub use loader::{Component, ComponentLoader, FnLoader, LoadComponent, ModuleSourceLoader};
pub use registry::{console_registry, ComponentRegistry, ComponentRegistryBuilder};
