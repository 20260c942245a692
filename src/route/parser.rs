//! 路由源解析器
//!
//! 负责从 YAML / JSON 文件解析生成路由序列，并在加载时校验必填字段。

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

use super::node::{ComponentRef, RouteNode};
use crate::utils::{Result, RouteError};

/// 路由名称格式：字母或数字开头，只包含字母、数字、下划线和连字符
static ROUTE_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_-]*$").expect("Invalid route name regex")
});

/// 路由源格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// YAML（默认）
    Yaml,
    /// JSON
    Json,
}

impl SourceFormat {
    /// 根据文件扩展名判断格式
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => SourceFormat::Json,
            _ => SourceFormat::Yaml,
        }
    }
}

/// 路由源解析器
#[derive(Debug, Clone, Default)]
pub struct RouteParser;

impl RouteParser {
    /// 创建新的解析器实例
    pub fn new() -> Self {
        Self
    }

    /// 从文件解析路由序列
    ///
    /// # Errors
    ///
    /// - 文件不存在或无法读取时返回 IO 错误
    /// - 内容格式错误时返回 YAML / JSON 错误
    /// - 校验失败时返回 `InvalidRoute` 错误
    pub async fn parse_file(path: &Path) -> Result<Vec<RouteNode>> {
        let content = tokio::fs::read_to_string(path).await?;
        Self::parse_string(&content, SourceFormat::from_path(path))
    }

    /// 从文件同步解析路由序列
    pub fn parse_file_sync(path: &Path) -> Result<Vec<RouteNode>> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_string(&content, SourceFormat::from_path(path))
    }

    /// 从字符串解析路由序列
    pub fn parse_string(content: &str, format: SourceFormat) -> Result<Vec<RouteNode>> {
        let routes: Vec<RouteNode> = match format {
            SourceFormat::Yaml => serde_yaml::from_str(content)?,
            SourceFormat::Json => serde_json::from_str(content)?,
        };
        Self::validate(&routes)?;
        Ok(routes)
    }

    /// 校验路由序列
    ///
    /// 执行以下校验：
    /// - 名称非空且格式有效
    /// - 路径与重定向以 `/` 开头
    /// - 叶子视图节点不能声明重定向
    ///
    /// 所有问题合并为一个 `InvalidRoute` 错误返回。
    pub fn validate(routes: &[RouteNode]) -> Result<()> {
        let mut errors: Vec<String> = Vec::new();

        for route in routes {
            route.walk(&mut |node| Self::validate_node(node, &mut errors));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(RouteError::InvalidRoute(errors.join("; ")))
        }
    }

    fn validate_node(node: &RouteNode, errors: &mut Vec<String>) {
        if node.name.is_empty() {
            errors.push(format!("路径 '{}' 的路由名称不能为空", node.path));
        } else if !ROUTE_NAME_REGEX.is_match(&node.name) {
            errors.push(format!("路由名称 '{}' 格式无效", node.name));
        }

        if !node.path.starts_with('/') {
            errors.push(format!(
                "路由 '{}' 的路径 '{}' 必须以 / 开头",
                node.name, node.path
            ));
        }

        if let Some(ref redirect) = node.redirect {
            if !redirect.starts_with('/') {
                errors.push(format!(
                    "路由 '{}' 的重定向 '{}' 必须以 / 开头",
                    node.name, redirect
                ));
            }
            if node.children.is_empty() && matches!(node.component, Some(ComponentRef::View(_))) {
                errors.push(format!("叶子视图路由 '{}' 不能声明重定向", node.name));
            }
        }
    }
}
