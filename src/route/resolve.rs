//! 路由树解析
//!
//! 深度优先遍历路由树，把每个符号化的 `layout.X` / `view.Y` 引用替换为
//! 注册表中的具体加载器，生成可直接交给路由运行时挂载的新树。
//! 解析只做替换，从不调用延迟加载器。

use serde::Serialize;
use tracing::{debug, error};

use super::node::{ComponentRef, RouteMeta, RouteNode};
use crate::component::{ComponentLoader, ComponentRegistry};
use crate::utils::{Result, RouteError};

/// 已解析的路由节点
///
/// 与 [`RouteNode`] 是不同的类型：已解析的树不再携带符号化引用，
/// 因此不能被再次解析。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedRoute {
    /// 路由名称
    pub name: String,

    /// 完整 URL 路径
    pub path: String,

    /// 具体组件加载器（分组节点为空）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<ComponentLoader>,

    /// 重定向路径
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,

    /// 元数据
    pub meta: RouteMeta,

    /// 子路由
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ResolvedRoute>,
}

impl ResolvedRoute {
    /// 子树节点总数（含自身）
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(ResolvedRoute::node_count).sum::<usize>()
    }

    /// 深度优先遍历子树（先序）
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a ResolvedRoute)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }
}

/// 解析路由树
///
/// 保持节点顺序与嵌套结构；除组件外的字段原样复制。
///
/// # Errors
///
/// 任一引用在注册表中不存在时返回 `UnresolvedComponentKey`，不返回部分解析的树。
pub fn resolve(routes: &[RouteNode], registry: &ComponentRegistry) -> Result<Vec<ResolvedRoute>> {
    let resolved = routes
        .iter()
        .map(|route| resolve_node(route, registry))
        .collect::<Result<Vec<_>>>()?;

    debug!(
        routes = resolved.len(),
        nodes = resolved.iter().map(ResolvedRoute::node_count).sum::<usize>(),
        "路由树解析完成"
    );
    Ok(resolved)
}

fn resolve_node(route: &RouteNode, registry: &ComponentRegistry) -> Result<ResolvedRoute> {
    let component = match route.component {
        Some(ref component) => Some(lookup(route, component, registry)?.clone()),
        None => None,
    };

    let children = route
        .children
        .iter()
        .map(|child| resolve_node(child, registry))
        .collect::<Result<Vec<_>>>()?;

    Ok(ResolvedRoute {
        name: route.name.clone(),
        path: route.path.clone(),
        component,
        redirect: route.redirect.clone(),
        meta: route.meta.clone(),
        children,
    })
}

fn lookup<'r>(
    route: &RouteNode,
    component: &ComponentRef,
    registry: &'r ComponentRegistry,
) -> Result<&'r ComponentLoader> {
    registry.lookup(component).ok_or_else(|| {
        error!(
            route = %route.name,
            component = %component,
            "组件引用未在注册表中注册"
        );
        RouteError::UnresolvedComponentKey {
            kind: component.kind().to_string(),
            key: component.key().to_string(),
            route: route.name.clone(),
        }
    })
}

/// 检查路由树中的全部组件引用都已注册，但不做替换
///
/// 用于不经解析、原样交给运行时的常量路由。
///
/// # Errors
///
/// 深度优先遇到的第一个未注册引用返回 `UnresolvedComponentKey`
pub fn ensure_registered(routes: &[RouteNode], registry: &ComponentRegistry) -> Result<()> {
    for route in routes {
        let mut first_missing: Option<&RouteNode> = None;
        route.walk(&mut |node| {
            if first_missing.is_none() {
                if let Some(ref component) = node.component {
                    if !registry.contains(component) {
                        first_missing = Some(node);
                    }
                }
            }
        });

        if let Some(node) = first_missing {
            if let Some(ref component) = node.component {
                lookup(node, component, registry)?;
            }
        }
    }
    Ok(())
}

/// 收集所有未注册的组件引用（路由名称，引用），按深度优先顺序
///
/// 用于一次性诊断全部缺失项；[`resolve`] 本身在第一个缺失处即失败。
pub fn missing_components(
    routes: &[RouteNode],
    registry: &ComponentRegistry,
) -> Vec<(String, ComponentRef)> {
    let mut missing = Vec::new();
    for route in routes {
        route.walk(&mut |node| {
            if let Some(ref component) = node.component {
                if !registry.contains(component) {
                    missing.push((node.name.clone(), component.clone()));
                }
            }
        });
    }
    missing
}
