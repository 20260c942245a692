//! 组件加载器
//!
//! 注册表中每个键对应一个加载器：要么是已就绪的组件引用，
//! 要么是首次导航时才执行的延迟加载器。解析器只做替换，从不调用加载器。

use async_trait::async_trait;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, error};

use crate::route::ComponentKind;
use crate::utils::{Result, RouteError};

/// 已加载的组件引用
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Component {
    /// 组件类别
    pub kind: ComponentKind,
    /// 注册表键
    pub key: String,
    /// 组件模块来源
    pub source: String,
}

impl Component {
    /// 创建组件引用
    pub fn new(kind: ComponentKind, key: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            kind,
            key: key.into(),
            source: source.into(),
        }
    }
}

/// 延迟组件加载接口
///
/// 由路由运行时在首次导航到对应节点时调用。
/// 同一加载器被并发调用时的去重由运行时负责。
#[async_trait]
pub trait LoadComponent: Send + Sync {
    /// 加载组件
    async fn load(&self) -> Result<Component>;

    /// 组件模块来源（用于调试输出）
    fn source(&self) -> &str;
}

/// 按模块来源延迟加载的加载器
///
/// 构造时只记录来源，不触碰组件模块本身。
#[derive(Debug, Clone)]
pub struct ModuleSourceLoader {
    kind: ComponentKind,
    key: String,
    source: String,
}

impl ModuleSourceLoader {
    /// 创建加载器
    pub fn new(kind: ComponentKind, key: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            kind,
            key: key.into(),
            source: source.into(),
        }
    }
}

#[async_trait]
impl LoadComponent for ModuleSourceLoader {
    async fn load(&self) -> Result<Component> {
        // 让出一次调度，模拟异步模块获取
        tokio::task::yield_now().await;
        debug!(key = %self.key, source = %self.source, "组件模块已加载");
        Ok(Component::new(self.kind, self.key.clone(), self.source.clone()))
    }

    fn source(&self) -> &str {
        &self.source
    }
}

/// 基于闭包的加载器
pub struct FnLoader<F> {
    source: String,
    load_fn: F,
}

impl<F> FnLoader<F> {
    /// 创建闭包加载器
    pub fn new(source: impl Into<String>, load_fn: F) -> Self {
        Self {
            source: source.into(),
            load_fn,
        }
    }
}

#[async_trait]
impl<F, Fut> LoadComponent for FnLoader<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<Component>> + Send + 'static,
{
    async fn load(&self) -> Result<Component> {
        (self.load_fn)().await
    }

    fn source(&self) -> &str {
        &self.source
    }
}

/// 组件加载器
#[derive(Clone)]
pub enum ComponentLoader {
    /// 已就绪的组件
    Ready(Component),
    /// 延迟加载器
    Deferred(Arc<dyn LoadComponent>),
}

impl ComponentLoader {
    /// 包装已就绪的组件
    pub fn ready(component: Component) -> Self {
        ComponentLoader::Ready(component)
    }

    /// 包装延迟加载器
    pub fn deferred(loader: impl LoadComponent + 'static) -> Self {
        ComponentLoader::Deferred(Arc::new(loader))
    }

    /// 按模块来源创建延迟加载器
    pub fn from_source(kind: ComponentKind, key: impl Into<String>, source: impl Into<String>) -> Self {
        Self::deferred(ModuleSourceLoader::new(kind, key, source))
    }

    /// 由闭包创建延迟加载器
    pub fn from_fn<F, Fut>(source: impl Into<String>, load_fn: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Component>> + Send + 'static,
    {
        Self::deferred(FnLoader::new(source, load_fn))
    }

    /// 是否为延迟加载器
    pub fn is_deferred(&self) -> bool {
        matches!(self, ComponentLoader::Deferred(_))
    }

    /// 组件模块来源
    pub fn source(&self) -> &str {
        match self {
            ComponentLoader::Ready(component) => &component.source,
            ComponentLoader::Deferred(loader) => loader.source(),
        }
    }

    /// 获取组件
    ///
    /// 已就绪的组件直接返回；延迟加载器在此时才被调用。
    /// 失败不重试，原样交给调用方（路由运行时的错误兜底路由）。
    pub async fn load(&self) -> Result<Component> {
        match self {
            ComponentLoader::Ready(component) => Ok(component.clone()),
            ComponentLoader::Deferred(loader) => match loader.load().await {
                Ok(component) => Ok(component),
                Err(e) => {
                    error!(source = %loader.source(), error = %e, "延迟组件加载失败");
                    Err(match e {
                        RouteError::LoaderFailed { .. } => e,
                        other => RouteError::LoaderFailed {
                            module: loader.source().to_string(),
                            reason: other.to_string(),
                        },
                    })
                }
            },
        }
    }

    /// 是否为同一个加载器（延迟加载器按实例比较）
    pub fn same_loader(&self, other: &ComponentLoader) -> bool {
        match (self, other) {
            (ComponentLoader::Ready(a), ComponentLoader::Ready(b)) => a == b,
            (ComponentLoader::Deferred(a), ComponentLoader::Deferred(b)) => {
                std::ptr::eq(
                    Arc::as_ptr(a) as *const (),
                    Arc::as_ptr(b) as *const (),
                )
            }
            _ => false,
        }
    }
}

impl PartialEq for ComponentLoader {
    fn eq(&self, other: &Self) -> bool {
        self.same_loader(other)
    }
}

impl fmt::Debug for ComponentLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentLoader::Ready(component) => f.debug_tuple("Ready").field(component).finish(),
            ComponentLoader::Deferred(loader) => {
                f.debug_tuple("Deferred").field(&loader.source()).finish()
            }
        }
    }
}

impl Serialize for ComponentLoader {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ComponentLoader", 2)?;
        state.serialize_field("source", self.source())?;
        state.serialize_field("deferred", &self.is_deferred())?;
        state.end()
    }
}
