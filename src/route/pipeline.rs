//! 路由流水线
//!
//! 串联 合并 → 分类 → 解析 三个阶段：
//! 自定义路由与生成路由合并分类后，只有权限路由进入解析阶段，
//! 常量路由原样交给路由运行时。任一阶段出错即整体失败。

use serde::Serialize;
use std::time::Instant;
use tracing::{debug, info};

use super::classify::{classify, ensure_unique_names, sort_by_order, ClassifiedRoutes};
use super::custom::custom_routes;
use super::node::RouteNode;
use super::parser::RouteParser;
use super::resolve::{ensure_registered, resolve, ResolvedRoute};
use crate::component::ComponentRegistry;
use crate::core::config::RoutesConfig;
use crate::utils::Result;

/// 可直接交给路由运行时的路由树
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouterTree {
    /// 常量路由（未解析，由运行时直接挂载）
    pub constant_routes: Vec<RouteNode>,
    /// 已解析的权限路由
    pub auth_routes: Vec<ResolvedRoute>,
}

impl RouterTree {
    /// 节点总数
    pub fn node_count(&self) -> usize {
        self.constant_routes.iter().map(RouteNode::node_count).sum::<usize>()
            + self.auth_routes.iter().map(ResolvedRoute::node_count).sum::<usize>()
    }
}

/// 路由流水线
#[derive(Debug, Clone, Default)]
pub struct RoutePipeline {
    config: RoutesConfig,
}

impl RoutePipeline {
    /// 使用指定配置创建流水线
    pub fn new(config: RoutesConfig) -> Self {
        Self { config }
    }

    /// 获取配置
    pub fn config(&self) -> &RoutesConfig {
        &self.config
    }

    /// 加载生成路由
    ///
    /// 未配置生成路由文件时返回空序列。
    pub async fn load_generated(&self) -> Result<Vec<RouteNode>> {
        match self.config.generated_path {
            Some(ref path) => {
                let routes = RouteParser::parse_file(path).await?;
                info!(path = %path.display(), routes = routes.len(), "已加载生成路由");
                Ok(routes)
            }
            None => {
                debug!("未配置生成路由文件，使用空序列");
                Ok(Vec::new())
            }
        }
    }

    /// 合并自定义路由与生成路由并分类
    ///
    /// 开启 `check_duplicate_names` 时先检查全树名称唯一。
    pub fn create_static_routes(&self, generated: Vec<RouteNode>) -> Result<ClassifiedRoutes> {
        self.classify_with(custom_routes(), generated)
    }

    /// 使用给定的自定义路由合并分类
    pub fn classify_with(
        &self,
        custom: Vec<RouteNode>,
        generated: Vec<RouteNode>,
    ) -> Result<ClassifiedRoutes> {
        if self.config.check_duplicate_names {
            ensure_unique_names(custom.iter().chain(generated.iter()))?;
        }

        Ok(classify(custom, generated))
    }

    /// 解析权限路由
    pub fn auth_router_routes(
        &self,
        classified: &ClassifiedRoutes,
        registry: &ComponentRegistry,
    ) -> Result<Vec<ResolvedRoute>> {
        resolve(&classified.auth_routes, registry)
    }

    /// 构建完整的路由树
    pub fn build(&self, generated: Vec<RouteNode>, registry: &ComponentRegistry) -> Result<RouterTree> {
        self.build_with(custom_routes(), generated, registry)
    }

    /// 使用给定的自定义路由构建完整的路由树
    ///
    /// 常量路由原样保留，但其组件引用会与权限路由一样对照注册表检查。
    pub fn build_with(
        &self,
        custom: Vec<RouteNode>,
        generated: Vec<RouteNode>,
        registry: &ComponentRegistry,
    ) -> Result<RouterTree> {
        let started = Instant::now();

        let mut classified = self.classify_with(custom, generated)?;
        if self.config.sort_by_order {
            sort_by_order(&mut classified.constant_routes);
            sort_by_order(&mut classified.auth_routes);
        }

        // 常量路由不解析，但引用同样必须已注册
        ensure_registered(&classified.constant_routes, registry)?;
        let auth_routes = self.auth_router_routes(&classified, registry)?;
        let tree = RouterTree {
            constant_routes: classified.constant_routes,
            auth_routes,
        };

        info!(
            constant = tree.constant_routes.len(),
            auth = tree.auth_routes.len(),
            nodes = tree.node_count(),
            duration_us = started.elapsed().as_micros() as u64,
            "路由树构建完成"
        );
        Ok(tree)
    }
}
