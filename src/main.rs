mod cli;
mod commands;
mod output;

use anyhow::Result;
use careerpath_client::utils::logging;
use careerpath_client::{App, Config};
use clap::Parser;
use tracing::warn;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("careerpath error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = cli::Cli::parse();

    // 加载配置，命令行参数优先
    let mut config = Config::from_env();
    if let Some(url) = cli.api_url.as_deref() {
        config = config.with_api_base_url(url);
    }
    config.verbose_logging |= cli.verbose;

    // 初始化日志
    logging::init(config.verbose_logging)?;

    let flags = cli.global_flags();
    let app = App::initialize(config).await?;

    // Ctrl-C 时丢弃命令 future，进行中的请求随之取消
    tokio::select! {
        result = commands::dispatch(&cli.command, &app, &flags) => result,
        _ = tokio::signal::ctrl_c() => {
            warn!("⚠️ 已取消");
            anyhow::bail!("interrupted")
        }
    }
}
