//! # 服务定位器演示应用
//!
//! 扫描 `services` 模块完成自动注册，然后把每个路由当作一次请求，
//! 在独立作用域的 tokio 任务中执行并输出 JSON。

use anyhow::Context;
use clap::Parser;
use di_impl::ServiceCollection;
use infrastructure_common::ServiceLocatorOptions;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod endpoints;
mod services;

/// 自动注册扫描的模块
pub const SERVICES_MODULE: &str = concat!(module_path!(), "::services");

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "demo-app")]
#[command(about = "Lorn ADSP 服务定位器演示")]
struct Args {
    /// 配置文件路径
    #[arg(short, long, default_value = "config/service_locator.toml")]
    config: String,

    /// 只执行指定路由，默认执行全部路由
    #[arg(short, long)]
    route: Option<String>,

    /// 日志级别
    #[arg(long, default_value = "info")]
    log_level: String,

    /// 以 JSON 格式输出日志
    #[arg(long)]
    json_logs: bool,
}

/// 一次请求的输出
#[derive(Debug, Serialize)]
struct Response {
    route: String,
    status: u16,
    body: Value,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(&args);

    info!("启动服务定位器演示应用");

    let options = ServiceLocatorOptions::load(&args.config)
        .with_context(|| format!("加载配置失败: {}", args.config))?;

    let mut services = ServiceCollection::new();
    services
        .add_service_locator_with(SERVICES_MODULE, &options.registration)
        .context("自动注册服务失败")?;
    let provider = services.build_with(options.provider.clone());
    info!("服务容器构建完成: {:?}", provider);

    let routes: Vec<String> = match args.route {
        Some(route) => vec![route],
        None => endpoints::ROUTES.iter().map(ToString::to_string).collect(),
    };

    let mut handles = Vec::with_capacity(routes.len());
    for route in routes {
        let provider = provider.clone();
        handles.push(tokio::spawn(async move {
            let scope = provider.create_named_scope(route.clone());
            let result = endpoints::handle(&route, &scope);
            (route, result)
        }));
    }

    for handle in handles {
        let (route, result) = handle.await?;
        let response = match result {
            Ok(body) => Response {
                route,
                status: 200,
                body,
            },
            Err(e) => {
                error!("请求 {} 失败: {:#}", route, e);
                Response {
                    route,
                    status: 500,
                    body: json!({ "error": e.to_string() }),
                }
            }
        };
        println!("{}", serde_json::to_string(&response)?);
    }

    info!("演示完成");
    Ok(())
}

/// 初始化日志，`RUST_LOG` 优先于命令行参数
fn init_tracing(args: &Args) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if args.json_logs {
        builder.json().init();
    } else {
        builder.init();
    }
}
