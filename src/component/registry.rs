//! 组件注册表
//!
//! 两张独立的键 → 加载器映射：布局与视图。注册表构建完成后只读，
//! 进程级实例通过 [`console_registry`] 惰性构建一次。
//!
//! 组件模块可能（间接）引用注册表本身，因此注册表只保存延迟加载器，
//! 构建时从不加载任何组件模块。

use std::collections::HashMap;
use std::sync::LazyLock;

use tracing::{debug, warn};

use super::loader::ComponentLoader;
use crate::route::{ComponentKind, ComponentRef};

/// 组件注册表
#[derive(Debug, Clone, Default)]
pub struct ComponentRegistry {
    /// 布局：key -> loader
    layouts: HashMap<String, ComponentLoader>,

    /// 视图：key -> loader
    views: HashMap<String, ComponentLoader>,
}

impl ComponentRegistry {
    /// 创建注册表构建器
    pub fn builder() -> ComponentRegistryBuilder {
        ComponentRegistryBuilder::new()
    }

    /// 查找布局加载器
    pub fn layout(&self, key: &str) -> Option<&ComponentLoader> {
        self.layouts.get(key)
    }

    /// 查找视图加载器
    pub fn view(&self, key: &str) -> Option<&ComponentLoader> {
        self.views.get(key)
    }

    /// 按类别查找加载器
    pub fn get(&self, kind: ComponentKind, key: &str) -> Option<&ComponentLoader> {
        match kind {
            ComponentKind::Layout => self.layout(key),
            ComponentKind::View => self.view(key),
        }
    }

    /// 按组件引用查找加载器
    pub fn lookup(&self, component: &ComponentRef) -> Option<&ComponentLoader> {
        self.get(component.kind(), component.key())
    }

    /// 是否包含指定引用
    pub fn contains(&self, component: &ComponentRef) -> bool {
        self.lookup(component).is_some()
    }

    /// 所有布局键（排序后）
    pub fn layout_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.layouts.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// 所有视图键（排序后）
    pub fn view_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.views.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// 注册的加载器总数
    pub fn len(&self) -> usize {
        self.layouts.len() + self.views.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty() && self.views.is_empty()
    }
}

/// 注册表构建器
#[derive(Debug, Default)]
pub struct ComponentRegistryBuilder {
    layouts: HashMap<String, ComponentLoader>,
    views: HashMap<String, ComponentLoader>,
}

impl ComponentRegistryBuilder {
    /// 创建新的构建器
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册布局
    pub fn layout(mut self, key: impl Into<String>, loader: ComponentLoader) -> Self {
        let key = key.into();
        if self.layouts.insert(key.clone(), loader).is_some() {
            warn!(key = %key, "布局键重复注册，保留后者");
        }
        self
    }

    /// 注册视图
    pub fn view(mut self, key: impl Into<String>, loader: ComponentLoader) -> Self {
        let key = key.into();
        if self.views.insert(key.clone(), loader).is_some() {
            warn!(key = %key, "视图键重复注册，保留后者");
        }
        self
    }

    /// 按模块来源注册延迟布局
    pub fn layout_source(self, key: &str, source: &str) -> Self {
        self.layout(key, ComponentLoader::from_source(ComponentKind::Layout, key, source))
    }

    /// 按模块来源注册延迟视图
    pub fn view_source(self, key: &str, source: &str) -> Self {
        self.view(key, ComponentLoader::from_source(ComponentKind::View, key, source))
    }

    /// 构建注册表
    pub fn build(self) -> ComponentRegistry {
        debug!(
            layouts = self.layouts.len(),
            views = self.views.len(),
            "组件注册表构建完成"
        );
        ComponentRegistry {
            layouts: self.layouts,
            views: self.views,
        }
    }
}

/// 管理后台布局：key -> 模块来源
const CONSOLE_LAYOUTS: &[(&str, &str)] = &[
    ("base", "layouts/base-layout/index"),
    ("blank", "layouts/blank-layout/index"),
];

/// 管理后台视图：key -> 模块来源
const CONSOLE_VIEWS: &[(&str, &str)] = &[
    ("403", "views/_builtin/403/index"),
    ("404", "views/_builtin/404/index"),
    ("500", "views/_builtin/500/index"),
    ("iframe-page", "views/_builtin/iframe-page/[url]"),
    ("login", "views/_builtin/login/index"),
    ("home", "views/home/index"),
    ("users", "views/users/index"),
    ("user-manage_list", "views/user-manage_list"),
    ("user-manage_recharge", "views/user-manage_recharge"),
    ("user-manage_kyc-list", "views/user-manage_kyc-list"),
    ("product-repo_add", "views/product-repo_add"),
    ("product-repo_collect", "views/product-repo_collect"),
    ("orders_all", "views/orders_all"),
    ("orders_seller", "views/orders_seller"),
    ("orders_internal", "views/orders_internal"),
    ("sellers_apply-list", "views/sellers_apply-list"),
    ("sellers_withdraw", "views/sellers_withdraw"),
    ("sellers_credit", "views/sellers_credit"),
    ("sellers_expense", "views/sellers_expense"),
    ("sellers_fake-seller-log", "views/sellers_fake-seller-log"),
    ("sellers_notice-log", "views/sellers_notice-log"),
    ("sellers_popup-log", "views/sellers_popup-log"),
    ("platform_publish", "views/platform_publish"),
];

static CONSOLE_REGISTRY: LazyLock<ComponentRegistry> = LazyLock::new(|| {
    let builder = CONSOLE_LAYOUTS
        .iter()
        .fold(ComponentRegistry::builder(), |b, (key, source)| {
            b.layout_source(key, source)
        });
    CONSOLE_VIEWS
        .iter()
        .fold(builder, |b, (key, source)| b.view_source(key, source))
        .build()
});

/// 管理后台的进程级组件注册表
///
/// 首次访问时构建，此后只读。
pub fn console_registry() -> &'static ComponentRegistry {
    &CONSOLE_REGISTRY
}
