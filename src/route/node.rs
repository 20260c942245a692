//! 路由节点数据模型
//!
//! 定义导航树中的单个节点、节点元数据以及符号化组件引用。
//! 组件引用在序列化边界上保持 `layout.<key>` / `view.<key>` 字符串形式，
//! 内部统一使用带标签的 [`ComponentRef`]。

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::utils::{Result, RouteError};

/// 布局引用前缀
const LAYOUT_PREFIX: &str = "layout.";

/// 视图引用前缀
const VIEW_PREFIX: &str = "view.";

/// 组件类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    /// 共享外壳布局
    Layout,
    /// 叶子内容视图
    View,
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentKind::Layout => write!(f, "layout"),
            ComponentKind::View => write!(f, "view"),
        }
    }
}

/// 符号化组件引用
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ComponentRef {
    /// `layout.<key>`
    Layout(String),
    /// `view.<key>`
    View(String),
}

impl ComponentRef {
    /// 创建布局引用
    pub fn layout(key: impl Into<String>) -> Self {
        ComponentRef::Layout(key.into())
    }

    /// 创建视图引用
    pub fn view(key: impl Into<String>) -> Self {
        ComponentRef::View(key.into())
    }

    /// 引用类别
    pub fn kind(&self) -> ComponentKind {
        match self {
            ComponentRef::Layout(_) => ComponentKind::Layout,
            ComponentRef::View(_) => ComponentKind::View,
        }
    }

    /// 注册表中的键
    pub fn key(&self) -> &str {
        match self {
            ComponentRef::Layout(key) | ComponentRef::View(key) => key,
        }
    }
}

impl FromStr for ComponentRef {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self> {
        let (ctor, key): (fn(String) -> ComponentRef, &str) =
            if let Some(key) = s.strip_prefix(LAYOUT_PREFIX) {
                (ComponentRef::Layout, key)
            } else if let Some(key) = s.strip_prefix(VIEW_PREFIX) {
                (ComponentRef::View, key)
            } else {
                return Err(RouteError::InvalidComponentRef(s.to_string()));
            };

        // 拒绝空键以及 `layout.base$view.home` 这类复合写法
        if key.is_empty() || key.contains('$') || key.chars().any(char::is_whitespace) {
            return Err(RouteError::InvalidComponentRef(s.to_string()));
        }

        Ok(ctor(key.to_string()))
    }
}

impl TryFrom<String> for ComponentRef {
    type Error = RouteError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<ComponentRef> for String {
    fn from(value: ComponentRef) -> Self {
        value.to_string()
    }
}

impl fmt::Display for ComponentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentRef::Layout(key) => write!(f, "{}{}", LAYOUT_PREFIX, key),
            ComponentRef::View(key) => write!(f, "{}{}", VIEW_PREFIX, key),
        }
    }
}

/// 路由元数据
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteMeta {
    /// 标题
    #[serde(default)]
    pub title: String,

    /// 国际化键
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub i18n_key: Option<String>,

    /// 菜单图标
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// 同级排序（越小越靠前）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,

    /// 是否为常量路由（无需授权）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constant: Option<bool>,

    /// 是否在菜单中隐藏
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hide_in_menu: Option<bool>,

    /// 是否缓存页面
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keep_alive: Option<bool>,

    /// 其他元数据键（`activeMenu`、`href`、`query` 等），原样保留
    #[serde(flatten, default)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl RouteMeta {
    /// 创建带标题和国际化键的元数据
    pub fn new(title: impl Into<String>, i18n_key: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            i18n_key: Some(i18n_key.into()),
            ..Default::default()
        }
    }

    /// 是否为常量路由
    pub fn is_constant(&self) -> bool {
        self.constant.unwrap_or(false)
    }
}

/// 路由节点
///
/// 导航树中的一个条目：页面或页面分组。节点在加载时构造一次，此后不再修改。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteNode {
    /// 全树唯一的路由名称
    pub name: String,

    /// 完整 URL 路径（子路由同样写完整路径）
    pub path: String,

    /// 组件引用（分组节点为空）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<ComponentRef>,

    /// 重定向路径
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,

    /// 元数据
    #[serde(default)]
    pub meta: RouteMeta,

    /// 子路由
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RouteNode>,
}

impl RouteNode {
    /// 创建路由节点
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            component: None,
            redirect: None,
            meta: RouteMeta::default(),
            children: Vec::new(),
        }
    }

    /// 设置布局组件
    pub fn layout(mut self, key: impl Into<String>) -> Self {
        self.component = Some(ComponentRef::layout(key));
        self
    }

    /// 设置视图组件
    pub fn view(mut self, key: impl Into<String>) -> Self {
        self.component = Some(ComponentRef::view(key));
        self
    }

    /// 设置重定向
    pub fn redirect(mut self, path: impl Into<String>) -> Self {
        self.redirect = Some(path.into());
        self
    }

    /// 设置元数据
    pub fn meta(mut self, meta: RouteMeta) -> Self {
        self.meta = meta;
        self
    }

    /// 设置标题和国际化键
    pub fn title(mut self, title: impl Into<String>, i18n_key: impl Into<String>) -> Self {
        self.meta.title = title.into();
        self.meta.i18n_key = Some(i18n_key.into());
        self
    }

    /// 设置图标
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.meta.icon = Some(icon.into());
        self
    }

    /// 设置排序
    pub fn order(mut self, order: i32) -> Self {
        self.meta.order = Some(order);
        self
    }

    /// 标记为常量路由
    pub fn constant(mut self, constant: bool) -> Self {
        self.meta.constant = Some(constant);
        self
    }

    /// 追加子路由
    pub fn child(mut self, child: RouteNode) -> Self {
        self.children.push(child);
        self
    }

    /// 追加多个子路由
    pub fn children(mut self, children: impl IntoIterator<Item = RouteNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// 是否为常量路由
    pub fn is_constant(&self) -> bool {
        self.meta.is_constant()
    }

    /// 是否为分组节点（无自身组件）
    pub fn is_group(&self) -> bool {
        self.component.is_none()
    }

    /// 子树节点总数（含自身）
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(RouteNode::node_count).sum::<usize>()
    }

    /// 深度优先遍历子树（先序）
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a RouteNode)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_component_ref() {
        let layout: ComponentRef = "layout.base".parse().unwrap();
        assert_eq!(layout, ComponentRef::Layout("base".to_string()));
        assert_eq!(layout.kind(), ComponentKind::Layout);

        let view: ComponentRef = "view.user-manage_list".parse().unwrap();
        assert_eq!(view.key(), "user-manage_list");
        assert_eq!(view.kind(), ComponentKind::View);
    }

    #[test]
    fn test_parse_invalid_component_ref() {
        for raw in ["base", "page.home", "view.", "layout.base$view.home", ""] {
            let result = raw.parse::<ComponentRef>();
            assert!(
                matches!(result, Err(RouteError::InvalidComponentRef(_))),
                "应拒绝: {raw:?}"
            );
        }
    }

    #[test]
    fn test_component_ref_display() {
        assert_eq!(ComponentRef::layout("blank").to_string(), "layout.blank");
        assert_eq!(ComponentRef::view("home").to_string(), "view.home");
    }

    #[test]
    fn test_route_node_serde_string_form() {
        let yaml = r#"
name: user-manage
path: /user-manage
component: layout.base
redirect: /user-manage/list
meta:
  title: 用户管理
  i18nKey: route.user-manage
  icon: mdi:account-multiple
  order: 2
children:
  - name: user-manage_list
    path: /user-manage/list
    component: view.user-manage_list
    meta:
      title: 用户列表
      i18nKey: route.user-manage_list
"#;
        let node: RouteNode = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(node.component, Some(ComponentRef::layout("base")));
        assert_eq!(node.meta.order, Some(2));
        assert_eq!(node.meta.i18n_key.as_deref(), Some("route.user-manage"));
        assert_eq!(node.children.len(), 1);
        assert_eq!(
            node.children[0].component,
            Some(ComponentRef::view("user-manage_list"))
        );

        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["component"], "layout.base");
        assert_eq!(json["meta"]["i18nKey"], "route.user-manage");
        assert!(json["meta"].get("constant").is_none());
    }

    #[test]
    fn test_unknown_meta_keys_are_kept() {
        let yaml = r#"
title: users
activeMenu: home
multiTab: true
href: https://example.com
query:
  - key: tab
    value: all
"#;
        let meta: RouteMeta = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(meta.title, "users");
        assert_eq!(meta.extra.len(), 4);
        assert_eq!(meta.extra["activeMenu"], "home");
        assert_eq!(meta.extra["multiTab"], true);

        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["activeMenu"], "home");
        assert_eq!(json["href"], "https://example.com");
        assert_eq!(json["query"][0]["value"], "all");
        assert!(json.get("extra").is_none());
    }

    #[test]
    fn test_route_node_rejects_bad_component() {
        let yaml = "name: x\npath: /x\ncomponent: widget.x\n";
        assert!(serde_yaml::from_str::<RouteNode>(yaml).is_err());
    }

    #[test]
    fn test_builder_and_walk() {
        let node = RouteNode::new("orders", "/orders")
            .layout("base")
            .redirect("/orders/all")
            .title("成交订单", "route.orders")
            .order(4)
            .child(RouteNode::new("orders_all", "/orders/all").view("orders_all"))
            .child(RouteNode::new("orders_seller", "/orders/seller").view("orders_seller"));

        assert_eq!(node.node_count(), 3);
        assert!(!node.is_constant());
        assert!(!node.is_group());

        let mut names = Vec::new();
        node.walk(&mut |n| names.push(n.name.as_str()));
        assert_eq!(names, vec!["orders", "orders_all", "orders_seller"]);
    }

    #[test]
    fn test_constant_flag() {
        let node = RouteNode::new("login", "/login").view("login").constant(true);
        assert!(node.is_constant());
        assert!(!RouteNode::new("group", "/group").is_constant());
        assert!(RouteNode::new("group", "/group").is_group());
    }
}
