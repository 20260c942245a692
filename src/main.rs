//! Admin Routes 命令行入口
//!
//! 管理后台路由定义层的命令行工具，用于检查配置和查看合并、解析后的路由树。
//!
//! # 命令概览
//!
//! - `check-config` - 验证配置文件
//! - `classify` - 查看常量路由与权限路由的划分
//! - `routes` - 查看解析后的路由树
//! - `preload` - 执行权限路由的全部组件加载器
//! - `version` - 显示版本信息
//!
//! # 使用示例
//!
//! ```bash
//! # 使用自定义配置文件查看路由树
//! admin-routes -c console.yaml routes
//!
//! # 以 JSON 输出路由树
//! admin-routes routes --json
//!
//! # 检查配置文件
//! admin-routes check-config -c config.yaml
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tokio::task::JoinSet;
use tracing::{info, warn};

use admin_routes::{
    console_registry, AppConfig, ClassifiedRoutes, LogGuard, Logger, LoggerConfig,
    ResolvedRoute, RouteNode, RoutePipeline, RouterTree,
};

/// Admin Routes - 管理后台路由组合引擎
#[derive(Parser)]
#[command(name = "admin-routes")]
#[command(version, about = "管理后台路由定义层工具", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// 配置文件路径
    #[arg(short, long, default_value = "config.yaml", global = true)]
    config: PathBuf,

    /// 日志级别 (trace, debug, info, warn, error)，覆盖配置文件
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// 开发模式（输出文件名和行号）
    #[arg(long, global = true)]
    dev: bool,

    /// 子命令
    #[command(subcommand)]
    command: Option<Commands>,
}

/// 可用的子命令
#[derive(Subcommand)]
enum Commands {
    /// 验证配置文件
    ///
    /// 检查配置文件是否有效，并显示解析后的配置内容。
    CheckConfig {
        /// 配置文件路径（不指定则使用全局 -c 选项）
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// 查看路由分类
    ///
    /// 合并自定义路由与生成路由，列出常量路由和权限路由的顶层名称。
    Classify,

    /// 查看路由树
    ///
    /// 构建完整的路由树；权限路由的组件引用替换为注册表中的加载器。
    Routes {
        /// 以 JSON 格式输出
        #[arg(long)]
        json: bool,
    },

    /// 预加载组件
    ///
    /// 并发执行权限路由树中的全部组件加载器，报告加载失败的组件。
    Preload,

    /// 查看版本信息
    Version,
}

/// 加载配置文件
///
/// 文件不存在时使用默认配置；命令行参数覆盖配置文件中的对应项。
async fn load_config(cli: &Cli, config_path: &Path) -> anyhow::Result<AppConfig> {
    let mut config = if config_path.exists() {
        AppConfig::from_file(config_path)
            .await
            .with_context(|| format!("无法加载配置文件 {}", config_path.display()))?
    } else {
        AppConfig::default()
    };

    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    if cli.dev {
        config.dev_mode = true;
    }
    Ok(config)
}

/// 初始化日志系统
fn init_logging(config: &AppConfig) -> LogGuard {
    let mut logger_config = LoggerConfig::from_log_config(&config.logging);
    if config.dev_mode {
        logger_config.show_file_line = true;
    }
    Logger::try_init(logger_config)
}

/// 检查配置文件
async fn check_config(cli: &Cli, path: &Path) -> anyhow::Result<()> {
    println!("检查配置文件: {}", path.display());
    println!();

    if !path.exists() {
        println!("⚠️  警告: 配置文件不存在，将使用默认配置");
        println!();
    }

    let config = load_config(cli, path).await?;
    let routes = &config.routes;

    println!("配置内容:");
    println!("────────────────────────────────────────");
    println!("  [路由配置]");
    match routes.generated_path {
        Some(ref generated) => println!("    生成路由文件:   {}", generated.display()),
        None => println!("    生成路由文件:   (未配置)"),
    }
    println!("    名称唯一检查:   {}", if routes.check_duplicate_names { "启用" } else { "禁用" });
    println!("    按 order 排序:  {}", if routes.sort_by_order { "启用" } else { "禁用" });
    println!();
    println!("  [日志配置]");
    println!("    日志级别:       {}", config.logging.level);
    println!("    文件输出:       {}", if config.logging.file_output { "是" } else { "否" });
    println!("    JSON 格式:      {}", if config.logging.json_format { "是" } else { "否" });
    println!("    轮转策略:       {}", config.logging.rotation);
    println!();
    println!("  [其他]");
    println!("    开发模式:       {}", if config.dev_mode { "是" } else { "否" });
    println!("────────────────────────────────────────");

    // 生成路由文件必须可以解析
    if routes.generated_path.is_some() {
        let generated = RoutePipeline::new(routes.clone()).load_generated().await?;
        println!("✅ 生成路由有效，共 {} 条顶层路由", generated.len());
    } else {
        println!("✅ 配置文件有效");
    }
    Ok(())
}

/// 显示路由分类
fn print_classified(classified: &ClassifiedRoutes) {
    let names = |routes: &[RouteNode]| {
        routes.iter().map(|r| r.name.as_str()).collect::<Vec<_>>().join(", ")
    };

    println!();
    println!("常量路由 ({}): {}", classified.constant_routes.len(), names(&classified.constant_routes));
    println!("权限路由 ({}): {}", classified.auth_routes.len(), names(&classified.auth_routes));
    println!();
}

/// 以缩进文本显示路由树
fn print_tree(tree: &RouterTree) {
    fn print_constant(route: &RouteNode, depth: usize) {
        let component = route
            .component
            .as_ref()
            .map(|c| c.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("{}{} {} [{}]", "  ".repeat(depth), route.name, route.path, component);
        for child in &route.children {
            print_constant(child, depth + 1);
        }
    }

    fn print_resolved(route: &ResolvedRoute, depth: usize) {
        let component = route.component.as_ref().map(|c| c.source()).unwrap_or("-");
        let redirect = route
            .redirect
            .as_deref()
            .map(|r| format!(" -> {}", r))
            .unwrap_or_default();
        println!(
            "{}{} {} [{}]{}",
            "  ".repeat(depth),
            route.name,
            route.path,
            component,
            redirect
        );
        for child in &route.children {
            print_resolved(child, depth + 1);
        }
    }

    println!();
    println!("常量路由（未解析）");
    println!("═══════════════════════════════════════");
    tree.constant_routes.iter().for_each(|r| print_constant(r, 1));
    println!();
    println!("权限路由（已解析）");
    println!("═══════════════════════════════════════");
    tree.auth_routes.iter().for_each(|r| print_resolved(r, 1));
    println!();
    println!("共 {} 个节点", tree.node_count());
    println!();
}

/// 并发执行权限路由树中的全部加载器
async fn preload(tree: &RouterTree) -> anyhow::Result<()> {
    let mut tasks = JoinSet::new();
    for route in &tree.auth_routes {
        route.walk(&mut |node| {
            if let Some(ref loader) = node.component {
                let loader = loader.clone();
                let name = node.name.clone();
                tasks.spawn(async move { (name, loader.load().await) });
            }
        });
    }

    let mut loaded = 0usize;
    let mut failed = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        let (name, result) = joined.context("加载任务异常退出")?;
        match result {
            Ok(_) => loaded += 1,
            Err(e) => {
                warn!(route = %name, error = %e, "组件预加载失败");
                failed.push((name, e));
            }
        }
    }

    println!("已加载 {} 个组件，失败 {} 个", loaded, failed.len());
    for (name, e) in &failed {
        println!("  ❌ {}: {}", name, e);
    }

    if failed.is_empty() {
        Ok(())
    } else {
        anyhow::bail!("{} 个组件加载失败", failed.len())
    }
}

/// 打印版本信息
fn print_version() {
    println!();
    println!("Admin Routes - 管理后台路由组合引擎");
    println!("═══════════════════════════════════════");
    println!("  版本:             {}", admin_routes::VERSION);
    println!("  布局数:           {}", console_registry().layout_keys().len());
    println!("  视图数:           {}", console_registry().view_keys().len());
    println!();
    println!("构建信息:");
    println!("  目标平台:         {}", std::env::consts::ARCH);
    println!("  操作系统:         {}", std::env::consts::OS);
    println!("═══════════════════════════════════════");
    println!();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let command = match cli.command {
        Some(Commands::Version) => {
            print_version();
            return Ok(());
        }
        Some(Commands::CheckConfig { ref config }) => {
            let path = config.clone().unwrap_or_else(|| cli.config.clone());
            return check_config(&cli, &path).await;
        }
        Some(ref command) => command,
        None => &Commands::Routes { json: false },
    };

    let config = load_config(&cli, &cli.config).await?;
    let _guard = init_logging(&config);
    info!(config = %cli.config.display(), dev = config.dev_mode, "配置已加载");

    let pipeline = RoutePipeline::new(config.routes.clone());
    let generated = pipeline.load_generated().await?;

    match command {
        Commands::Classify => {
            let classified = pipeline.create_static_routes(generated)?;
            print_classified(&classified);
        }
        Commands::Routes { json } => {
            let tree = pipeline.build(generated, console_registry())?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&tree)?);
            } else {
                print_tree(&tree);
            }
        }
        Commands::Preload => {
            let tree = pipeline.build(generated, console_registry())?;
            preload(&tree).await?;
        }
        Commands::Version | Commands::CheckConfig { .. } => {}
    }

    Ok(())
}
