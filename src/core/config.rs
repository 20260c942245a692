//! 应用配置
//!
//! 定义路由定义层的配置结构和加载逻辑。

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否输出到文件
    #[serde(default)]
    pub file_output: bool,

    /// 日志文件目录
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// 是否输出 JSON 格式
    #[serde(default)]
    pub json_format: bool,

    /// 日志轮转策略
    #[serde(default = "default_rotation")]
    pub rotation: String,

    /// 保留日志文件数
    #[serde(default = "default_max_files")]
    pub max_files: usize,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

fn default_max_files() -> usize {
    7
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_output: false,
            log_dir: None,
            json_format: false,
            rotation: default_rotation(),
            max_files: default_max_files(),
        }
    }
}

/// 路由配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutesConfig {
    /// 生成路由文件（YAML / JSON）
    #[serde(default)]
    pub generated_path: Option<PathBuf>,

    /// 合并前检查路由名称全树唯一
    #[serde(default = "default_true")]
    pub check_duplicate_names: bool,

    /// 按 meta.order 对同级路由排序
    #[serde(default = "default_true")]
    pub sort_by_order: bool,
}

fn default_true() -> bool {
    true
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            generated_path: None,
            check_duplicate_names: true,
            sort_by_order: true,
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// 配置文件路径
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// 日志配置
    #[serde(default)]
    pub logging: LogConfig,

    /// 路由配置
    #[serde(default)]
    pub routes: RoutesConfig,

    /// 是否为开发模式
    #[serde(default)]
    pub dev_mode: bool,
}

impl AppConfig {
    /// 创建配置构建器
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::new()
    }

    /// 从文件加载配置
    ///
    /// `.json` 按 JSON 解析，其他扩展名按 YAML 解析。
    /// 生成路由文件的相对路径以配置文件所在目录为基准。
    ///
    /// # Errors
    ///
    /// 文件无法读取时返回 IO 错误，内容无法解析时返回 `ConfigLoadFailed`
    pub async fn from_file(path: impl Into<PathBuf>) -> crate::utils::Result<Self> {
        let path = path.into();
        let content = tokio::fs::read_to_string(&path).await?;

        let parsed = if path.extension().map(|e| e == "json").unwrap_or(false) {
            serde_json::from_str::<AppConfig>(&content).map_err(|e| e.to_string())
        } else {
            serde_yaml::from_str::<AppConfig>(&content).map_err(|e| e.to_string())
        };
        let mut config = parsed.map_err(|reason| {
            crate::utils::RouteError::ConfigLoadFailed(format!("{}: {}", path.display(), reason))
        })?;

        if let Some(ref generated) = config.routes.generated_path {
            if generated.is_relative() {
                if let Some(base) = path.parent() {
                    config.routes.generated_path = Some(base.join(generated));
                }
            }
        }

        config.config_path = Some(path);
        Ok(config)
    }

    /// 合并另一个配置（用于覆盖）
    pub fn merge(&mut self, other: AppConfig) {
        // 只覆盖非默认值的配置
        if other.logging.level != default_log_level() {
            self.logging.level = other.logging.level;
        }
        if other.logging.file_output {
            self.logging.file_output = true;
            self.logging.log_dir = other.logging.log_dir;
        }
        if other.logging.json_format {
            self.logging.json_format = true;
        }
        if other.routes.generated_path.is_some() {
            self.routes.generated_path = other.routes.generated_path;
        }
        if !other.routes.check_duplicate_names {
            self.routes.check_duplicate_names = false;
        }
        if !other.routes.sort_by_order {
            self.routes.sort_by_order = false;
        }
        if other.dev_mode {
            self.dev_mode = true;
        }
    }
}

/// 配置构建器
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// 创建新的构建器
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    /// 设置配置文件路径
    pub fn config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.config_path = Some(path.into());
        self
    }

    /// 设置日志级别
    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.config.logging.level = level.into();
        self
    }

    /// 启用文件日志
    pub fn file_logging(mut self, log_dir: impl Into<PathBuf>) -> Self {
        self.config.logging.file_output = true;
        self.config.logging.log_dir = Some(log_dir.into());
        self
    }

    /// 启用 JSON 格式日志
    pub fn json_logging(mut self) -> Self {
        self.config.logging.json_format = true;
        self
    }

    /// 设置生成路由文件
    pub fn generated_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.routes.generated_path = Some(path.into());
        self
    }

    /// 设置是否检查名称唯一
    pub fn check_duplicate_names(mut self, enable: bool) -> Self {
        self.config.routes.check_duplicate_names = enable;
        self
    }

    /// 设置是否按 order 排序
    pub fn sort_by_order(mut self, enable: bool) -> Self {
        self.config.routes.sort_by_order = enable;
        self
    }

    /// 启用开发模式
    pub fn dev_mode(mut self) -> Self {
        self.config.dev_mode = true;
        self
    }

    /// 构建配置
    pub fn build(self) -> AppConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(!config.dev_mode);
        assert_eq!(config.logging.level, "info");
        assert!(config.routes.check_duplicate_names);
        assert!(config.routes.sort_by_order);
        assert!(config.routes.generated_path.is_none());
    }

    #[test]
    fn test_config_builder() {
        let config = AppConfig::builder()
            .log_level("debug")
            .generated_path("routes.yaml")
            .check_duplicate_names(false)
            .dev_mode()
            .build();

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.routes.generated_path, Some(PathBuf::from("routes.yaml")));
        assert!(!config.routes.check_duplicate_names);
        assert!(config.dev_mode);
    }

    #[test]
    fn test_config_merge() {
        let mut base = AppConfig::default();
        let override_config = AppConfig::builder()
            .log_level("debug")
            .sort_by_order(false)
            .dev_mode()
            .build();

        base.merge(override_config);

        assert_eq!(base.logging.level, "debug");
        assert!(!base.routes.sort_by_order);
        assert!(base.routes.check_duplicate_names);
        assert!(base.dev_mode);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let yaml = "routes:\n  generated_path: generated.yaml\n";
        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.logging.level, "info");
        assert!(config.routes.check_duplicate_names);
        assert_eq!(
            config.routes.generated_path,
            Some(PathBuf::from("generated.yaml"))
        );
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::builder()
            .log_level("warn")
            .sort_by_order(false)
            .build();

        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: AppConfig = serde_yaml::from_str(&yaml).unwrap();

        assert_eq!(parsed.logging.level, "warn");
        assert!(!parsed.routes.sort_by_order);
    }
}
