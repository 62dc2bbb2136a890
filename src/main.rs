use anyhow::Context;
use clap::Parser;
use greenlight::app::Application;
use greenlight::config::Config;
use greenlight::logging::{init_logging, LogConfig};
use greenlight::runtime_config::RuntimeConfig;
use greenlight::server::{AppService, HttpServer};
use std::sync::Arc;
use tracing::info;

fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    config.validate().context("invalid configuration")?;

    // Dropping the guard flushes buffered log lines, so it lives until exit.
    let _log_guard = init_logging(&LogConfig::from_config(&config))?;

    RuntimeConfig::from_env().apply();

    let addr = format!("0.0.0.0:{}", config.port);
    info!(dsn = %config.redacted_dsn(), "database configured");
    info!(env = %config.env, addr = %addr, "starting {} server on :{}", config.env, config.port);

    let app = Arc::new(Application::new(config));
    let server = HttpServer(AppService::new(app))
        .start(addr.as_str())
        .context("failed to start server")?;

    server
        .join()
        .map_err(|e| anyhow::anyhow!("server failed: {e:?}"))?;
    Ok(())
}
