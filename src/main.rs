// ==========================================
// 医药产品目录服务 - HTTP 服务主入口
// ==========================================

use anyhow::Context;
use pharma_catalog::app::{build_router, AppState};
use pharma_catalog::config::AppConfig;
use pharma_catalog::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;

    // 初始化日志系统
    logging::init(config.logging.json);

    tracing::info!("==================================================");
    tracing::info!("{} v{}", pharma_catalog::APP_NAME, pharma_catalog::VERSION);
    tracing::info!("==================================================");
    tracing::info!(db_path = %config.database.path, "使用数据库");

    let state = AppState::new(&config).context("failed to initialize application state")?;
    let app = build_router(state, config.server.body_limit_bytes());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("cannot bind {}", addr))?;
    tracing::info!(%addr, "服务已启动");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("服务已停止");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "无法监听退出信号");
    }
}
