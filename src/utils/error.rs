//! 路由定义层错误类型定义
//!
//! 本模块定义了路由合并、分类、解析过程中使用的所有错误类型。

use thiserror::Error;

/// 路由定义层核心错误类型
#[derive(Error, Debug)]
pub enum RouteError {
    // ==================== 路由解析错误 ====================

    /// 组件引用在注册表中不存在
    #[error("未解析的组件引用: 路由 '{route}' 引用的 {kind} '{key}' 未在注册表中注册")]
    UnresolvedComponentKey {
        /// 引用类型（layout / view）
        kind: String,
        /// 组件键
        key: String,
        /// 发起引用的路由名称
        route: String,
    },

    /// 路由名称重复
    #[error("路由名称重复: '{name}' (路径 '{first_path}' 与 '{second_path}')")]
    DuplicateRouteName {
        /// 重复的路由名称
        name: String,
        /// 首次出现的路径
        first_path: String,
        /// 再次出现的路径
        second_path: String,
    },

    /// 组件引用格式无效
    #[error("组件引用格式无效: '{0}'，应为 layout.<key> 或 view.<key>")]
    InvalidComponentRef(String),

    /// 路由定义无效
    #[error("路由定义无效: {0}")]
    InvalidRoute(String),

    // ==================== 组件加载错误 ====================

    /// 延迟加载器执行失败
    #[error("组件加载失败: '{module}' - {reason}")]
    LoaderFailed {
        /// 组件模块来源
        module: String,
        /// 失败原因
        reason: String,
    },

    // ==================== 配置错误 ====================

    /// 配置加载失败
    #[error("配置加载失败: {0}")]
    ConfigLoadFailed(String),

    /// 初始化失败
    #[error("初始化失败: {0}")]
    InitFailed(String),

    // ==================== IO 和序列化错误 ====================

    /// IO 错误
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// JSON 序列化/反序列化错误
    #[error("JSON 错误: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML 序列化/反序列化错误
    #[error("YAML 错误: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// 其他错误
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

/// 路由操作结果类型别名
pub type Result<T> = std::result::Result<T, RouteError>;

/// 错误码常量
pub mod error_code {
    // 路由错误 (ROUTE-xxx)
    /// 组件引用未注册
    pub const ROUTE_UNRESOLVED_COMPONENT: &str = "ROUTE-001";
    /// 路由名称重复
    pub const ROUTE_DUPLICATE_NAME: &str = "ROUTE-002";
    /// 组件引用格式无效
    pub const ROUTE_INVALID_COMPONENT_REF: &str = "ROUTE-003";
    /// 路由定义无效
    pub const ROUTE_INVALID_DEFINITION: &str = "ROUTE-004";

    // 组件错误 (COMPONENT-xxx)
    /// 组件加载失败
    pub const COMPONENT_LOAD_FAILED: &str = "COMPONENT-001";

    // 配置错误 (CONFIG-xxx)
    /// 配置加载失败
    pub const CONFIG_LOAD_FAILED: &str = "CONFIG-001";
    /// 初始化失败
    pub const CONFIG_INIT_FAILED: &str = "CONFIG-002";

    // 资源错误 (RESOURCE-xxx)
    /// 资源访问失败
    pub const RESOURCE_ACCESS_FAILED: &str = "RESOURCE-001";
    /// 资源格式错误
    pub const RESOURCE_FORMAT_ERROR: &str = "RESOURCE-002";
}

impl RouteError {
    /// 获取错误码
    pub fn error_code(&self) -> &'static str {
        match self {
            RouteError::UnresolvedComponentKey { .. } => error_code::ROUTE_UNRESOLVED_COMPONENT,
            RouteError::DuplicateRouteName { .. } => error_code::ROUTE_DUPLICATE_NAME,
            RouteError::InvalidComponentRef(_) => error_code::ROUTE_INVALID_COMPONENT_REF,
            RouteError::InvalidRoute(_) => error_code::ROUTE_INVALID_DEFINITION,
            RouteError::LoaderFailed { .. } => error_code::COMPONENT_LOAD_FAILED,
            RouteError::ConfigLoadFailed(_) => error_code::CONFIG_LOAD_FAILED,
            RouteError::InitFailed(_) => error_code::CONFIG_INIT_FAILED,
            RouteError::Io(_) => error_code::RESOURCE_ACCESS_FAILED,
            RouteError::Json(_) | RouteError::Yaml(_) => error_code::RESOURCE_FORMAT_ERROR,
            RouteError::Other(_) => "UNKNOWN",
        }
    }

    /// 是否为配置类错误（构建期缺陷，而非运行期状况）
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            RouteError::UnresolvedComponentKey { .. }
                | RouteError::DuplicateRouteName { .. }
                | RouteError::InvalidComponentRef(_)
                | RouteError::InvalidRoute(_)
                | RouteError::ConfigLoadFailed(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RouteError::UnresolvedComponentKey {
            kind: "view".to_string(),
            key: "user-manage_list".to_string(),
            route: "user-manage_list".to_string(),
        };
        assert!(err.to_string().contains("user-manage_list"));
        assert!(err.to_string().contains("view"));
    }

    #[test]
    fn test_error_code() {
        let err = RouteError::DuplicateRouteName {
            name: "users".to_string(),
            first_path: "/users".to_string(),
            second_path: "/users".to_string(),
        };
        assert_eq!(err.error_code(), error_code::ROUTE_DUPLICATE_NAME);

        let err = RouteError::InvalidComponentRef("page.home".to_string());
        assert_eq!(err.error_code(), error_code::ROUTE_INVALID_COMPONENT_REF);
    }

    #[test]
    fn test_configuration_error_classification() {
        let err = RouteError::InvalidRoute("empty name".to_string());
        assert!(err.is_configuration_error());

        let err = RouteError::LoaderFailed {
            module: "views/home/index".to_string(),
            reason: "network".to_string(),
        };
        assert!(!err.is_configuration_error());
    }

    #[test]
    fn test_error_codes_are_distinct() {
        use std::collections::HashSet;

        let codes = [
            error_code::ROUTE_UNRESOLVED_COMPONENT,
            error_code::ROUTE_DUPLICATE_NAME,
            error_code::ROUTE_INVALID_COMPONENT_REF,
            error_code::ROUTE_INVALID_DEFINITION,
            error_code::COMPONENT_LOAD_FAILED,
            error_code::CONFIG_LOAD_FAILED,
            error_code::CONFIG_INIT_FAILED,
            error_code::RESOURCE_ACCESS_FAILED,
            error_code::RESOURCE_FORMAT_ERROR,
        ];
        let unique: HashSet<_> = codes.iter().collect();
        assert_eq!(unique.len(), codes.len());
    }

    #[test]
    fn test_loader_error_names_source() {
        let err = RouteError::LoaderFailed {
            module: "views/broken".to_string(),
            reason: "模块不存在".to_string(),
        };
        assert_eq!(err.to_string(), "组件加载失败: 'views/broken' - 模块不存在");
        assert_eq!(err.error_code(), error_code::COMPONENT_LOAD_FAILED);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: RouteError = io_err.into();
        assert!(matches!(err, RouteError::Io(_)));
        assert_eq!(err.error_code(), error_code::RESOURCE_ACCESS_FAILED);
    }
}
