//! 多账号挂机启动器
//!
//! 发现本地会话文件，按轮询方式分配代理，
//! 为每个会话并发执行任务并汇总结果

mod client;
mod error;
mod launcher;
mod model;
mod proxy;
mod session;

use clap::Parser;

use crate::model::arg::Args;
use crate::model::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| Config::default_config_path().to_string());
    let mut config = Config::load(&config_path)?;
    config.override_from_env();

    launcher::process(&args, &config).await
}
