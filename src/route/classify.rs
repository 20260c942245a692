//! 路由合并与分类
//!
//! 将自定义路由与生成路由按固定顺序拼接（自定义在前），
//! 再按顶层节点的 `meta.constant` 分为常量路由与权限路由。

use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

use super::node::RouteNode;
use crate::utils::{Result, RouteError};

/// 分类结果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassifiedRoutes {
    /// 常量路由（无需授权）
    pub constant_routes: Vec<RouteNode>,
    /// 权限路由（需要授权）
    pub auth_routes: Vec<RouteNode>,
}

impl ClassifiedRoutes {
    /// 顶层路由总数
    pub fn len(&self) -> usize {
        self.constant_routes.len() + self.auth_routes.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.constant_routes.is_empty() && self.auth_routes.is_empty()
    }
}

/// 合并并分类路由
///
/// 只看顶层节点：整棵子树跟随其根节点进入同一分组。
/// 未显式声明 `constant` 的节点一律视为权限路由。
/// 每个顶层节点恰好出现在一个分组中，分组内保持拼接顺序。
pub fn classify(
    static_routes: impl IntoIterator<Item = RouteNode>,
    generated_routes: impl IntoIterator<Item = RouteNode>,
) -> ClassifiedRoutes {
    let mut classified = ClassifiedRoutes::default();

    for route in static_routes.into_iter().chain(generated_routes) {
        if route.is_constant() {
            classified.constant_routes.push(route);
        } else {
            classified.auth_routes.push(route);
        }
    }

    debug!(
        constant = classified.constant_routes.len(),
        auth = classified.auth_routes.len(),
        "路由分类完成"
    );
    classified
}

/// 检查路由名称在整棵树（任意深度）中唯一
///
/// 遇到第一个冲突即返回 `DuplicateRouteName`。
pub fn ensure_unique_names<'a>(routes: impl IntoIterator<Item = &'a RouteNode>) -> Result<()> {
    let mut seen: HashMap<&'a str, &'a str> = HashMap::new();
    let mut duplicate: Option<RouteError> = None;

    for route in routes {
        route.walk(&mut |node| {
            if duplicate.is_some() {
                return;
            }
            if let Some(first_path) = seen.insert(node.name.as_str(), node.path.as_str()) {
                duplicate = Some(RouteError::DuplicateRouteName {
                    name: node.name.clone(),
                    first_path: first_path.to_string(),
                    second_path: node.path.clone(),
                });
            }
        });

        if let Some(err) = duplicate.take() {
            return Err(err);
        }
    }

    Ok(())
}

/// 按 `meta.order` 对同级路由做稳定排序（递归）
///
/// 数值小的在前；未声明 `order` 的排在所有显式值之后；相同值保持声明顺序。
pub fn sort_by_order(routes: &mut [RouteNode]) {
    routes.sort_by_key(|route| match route.meta.order {
        Some(order) => (0, order),
        None => (1, 0),
    });
    for route in routes.iter_mut() {
        sort_by_order(&mut route.children);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_manage() -> RouteNode {
        RouteNode::new("user-manage", "/user-manage")
            .layout("base")
            .child(RouteNode::new("user-manage_list", "/user-manage/list").view("user-manage_list"))
    }

    fn login() -> RouteNode {
        RouteNode::new("login", "/login").view("login").constant(true)
    }

    #[test]
    fn test_group_without_constant_is_protected() {
        let classified = classify(vec![user_manage()], Vec::new());

        assert!(classified.constant_routes.is_empty());
        assert_eq!(classified.auth_routes, vec![user_manage()]);
        assert_eq!(classified.auth_routes[0].children.len(), 1);
    }

    #[test]
    fn test_classification_is_not_recursive() {
        // 常量子节点跟随受保护的父节点
        let parent = RouteNode::new("parent", "/parent")
            .child(RouteNode::new("parent_child", "/parent/child").view("x").constant(true));
        // 受保护子节点跟随常量父节点
        let open = RouteNode::new("open", "/open")
            .constant(true)
            .child(RouteNode::new("open_child", "/open/child").view("y").constant(false));

        let classified = classify(vec![parent.clone()], vec![open.clone()]);
        assert_eq!(classified.auth_routes, vec![parent]);
        assert_eq!(classified.constant_routes, vec![open]);
    }

    #[test]
    fn test_static_before_generated_order() {
        let a = RouteNode::new("a", "/a").view("a");
        let b = RouteNode::new("b", "/b").view("b").constant(true);
        let c = RouteNode::new("c", "/c").view("c");
        let d = RouteNode::new("d", "/d").view("d").constant(true);
        let e = RouteNode::new("e", "/e").view("e").constant(false);

        let classified = classify(vec![a.clone(), b.clone()], vec![c.clone(), d.clone(), e.clone()]);

        assert_eq!(classified.auth_routes, vec![a, c, e]);
        assert_eq!(classified.constant_routes, vec![b, d]);
        assert_eq!(classified.len(), 5);
    }

    #[test]
    fn test_siblings_without_order_keep_declaration_order() {
        let first = RouteNode::new("first", "/first").view("first");
        let second = RouteNode::new("second", "/second").view("second");

        let classified = classify(vec![first.clone(), second.clone()], Vec::new());
        assert_eq!(classified.auth_routes, vec![first.clone(), second.clone()]);

        let mut sorted = classified.auth_routes.clone();
        sort_by_order(&mut sorted);
        assert_eq!(sorted, vec![first, second]);
    }

    #[test]
    fn test_empty_inputs() {
        let classified = classify(Vec::new(), Vec::new());
        assert!(classified.is_empty());
    }

    #[test]
    fn test_sort_by_order() {
        let mut routes = vec![
            RouteNode::new("none-1", "/n1"),
            RouteNode::new("five", "/5").order(5),
            RouteNode::new("one", "/1").order(1),
            RouteNode::new("none-2", "/n2"),
            RouteNode::new("five-b", "/5b").order(5),
        ];
        sort_by_order(&mut routes);

        let names: Vec<&str> = routes.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["one", "five", "five-b", "none-1", "none-2"]);
    }

    #[test]
    fn test_sort_by_order_recurses() {
        let mut routes = vec![RouteNode::new("group", "/group")
            .child(RouteNode::new("group_b", "/group/b").order(2))
            .child(RouteNode::new("group_a", "/group/a").order(1))];
        sort_by_order(&mut routes);

        assert_eq!(routes[0].children[0].name, "group_a");
        assert_eq!(routes[0].children[1].name, "group_b");
    }

    #[test]
    fn test_unique_names_pass() {
        let routes = vec![user_manage(), login()];
        assert!(ensure_unique_names(&routes).is_ok());
    }

    #[test]
    fn test_duplicate_top_level_name() {
        let routes = vec![
            RouteNode::new("users", "/users").view("users"),
            RouteNode::new("users", "/users-copy").view("users"),
        ];
        let err = ensure_unique_names(&routes).unwrap_err();
        match err {
            RouteError::DuplicateRouteName {
                name,
                first_path,
                second_path,
            } => {
                assert_eq!(name, "users");
                assert_eq!(first_path, "/users");
                assert_eq!(second_path, "/users-copy");
            }
            other => panic!("意外错误: {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_nested_name_across_sources() {
        let custom = vec![user_manage()];
        let generated = vec![RouteNode::new("user-manage_list", "/list").view("user-manage_list")];

        let result = ensure_unique_names(custom.iter().chain(generated.iter()));
        assert!(matches!(
            result,
            Err(RouteError::DuplicateRouteName { ref name, .. }) if name == "user-manage_list"
        ));
    }
}
