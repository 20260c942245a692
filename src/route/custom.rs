//! 自定义路由
//!
//! 手工维护、不由代码生成产出的路由分组。
//! `users` 路由保留在生成路由中，此处不再重复声明。

use super::node::RouteNode;

/// 创建一个使用基础布局、重定向到首个子页面的分组
fn section(name: &str, title: &str, icon: &str, order: i32, leaves: &[(&str, &str)]) -> RouteNode {
    let path = format!("/{}", name);
    let children: Vec<RouteNode> = leaves
        .iter()
        .map(|(leaf, leaf_title)| {
            let leaf_name = format!("{}_{}", name, leaf);
            RouteNode::new(leaf_name.clone(), format!("{}/{}", path, leaf))
                .view(leaf_name.clone())
                .title(*leaf_title, format!("route.{}", leaf_name))
        })
        .collect();

    let mut group = RouteNode::new(name, path.clone())
        .layout("base")
        .title(title, format!("route.{}", name))
        .icon(icon)
        .order(order);

    if let Some((first, _)) = leaves.first() {
        group = group.redirect(format!("{}/{}", path, first));
    }

    group.children(children)
}

/// 手工维护的路由序列
///
/// 纯函数，每次调用返回相同顺序的相同数据。
pub fn custom_routes() -> Vec<RouteNode> {
    vec![
        section(
            "user-manage",
            "用户管理",
            "mdi:account-multiple",
            2,
            &[
                ("list", "用户列表"),
                ("recharge", "用户充值"),
                ("kyc-list", "用户KYC认证列表"),
            ],
        ),
        section(
            "product-repo",
            "产品仓库",
            "mdi:package-variant",
            3,
            &[("add", "添加产品"), ("collect", "产品采集")],
        ),
        section(
            "orders",
            "成交订单",
            "mdi:clipboard-text",
            4,
            &[
                ("all", "所有订单"),
                ("seller", "卖家订单"),
                ("internal", "内部订单"),
            ],
        ),
        section(
            "sellers",
            "卖家",
            "mdi:account-cash",
            5,
            &[
                ("apply-list", "卖家申请列表"),
                ("withdraw", "提款申请"),
                ("credit", "信用额度"),
                ("expense", "支出"),
                ("fake-seller-log", "设置虚拟卖家日志"),
                ("notice-log", "通知日志"),
                ("popup-log", "系统弹窗日志"),
            ],
        ),
        section(
            "platform",
            "平台管理",
            "mdi:clipboard-edit",
            6,
            &[("publish", "发布内容")],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::ComponentRef;
    use std::collections::HashSet;

    #[test]
    fn test_section_order_and_shape() {
        let routes = custom_routes();
        let names: Vec<&str> = routes.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["user-manage", "product-repo", "orders", "sellers", "platform"]
        );

        let orders: Vec<Option<i32>> = routes.iter().map(|r| r.meta.order).collect();
        assert_eq!(orders, vec![Some(2), Some(3), Some(4), Some(5), Some(6)]);

        for route in &routes {
            assert_eq!(route.component, Some(ComponentRef::layout("base")));
            assert!(!route.is_constant());
            assert_eq!(route.redirect.as_deref(), Some(route.children[0].path.as_str()));
        }
    }

    #[test]
    fn test_user_manage_section() {
        let routes = custom_routes();
        let user_manage = &routes[0];

        assert_eq!(user_manage.path, "/user-manage");
        assert_eq!(user_manage.meta.title, "用户管理");
        assert_eq!(user_manage.meta.i18n_key.as_deref(), Some("route.user-manage"));
        assert_eq!(user_manage.meta.icon.as_deref(), Some("mdi:account-multiple"));

        let list = &user_manage.children[0];
        assert_eq!(list.name, "user-manage_list");
        assert_eq!(list.path, "/user-manage/list");
        assert_eq!(list.component, Some(ComponentRef::view("user-manage_list")));
        assert_eq!(list.meta.title, "用户列表");
        assert_eq!(list.meta.i18n_key.as_deref(), Some("route.user-manage_list"));
        assert!(list.meta.icon.is_none());
        assert!(list.meta.order.is_none());
    }

    #[test]
    fn test_names_unique_and_no_users_route() {
        let routes = custom_routes();
        let mut seen = HashSet::new();
        for route in &routes {
            route.walk(&mut |node| {
                assert!(seen.insert(node.name.clone()), "重复名称: {}", node.name);
            });
        }
        assert!(!seen.contains("users"));
        assert_eq!(seen.len(), 5 + 16);
    }

    #[test]
    fn test_pure() {
        assert_eq!(custom_routes(), custom_routes());
    }
}
