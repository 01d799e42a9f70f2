use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use msgsearch_backend::api;
use msgsearch_backend::config;
use msgsearch_backend::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "msgsearch_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration / 加载配置
    let app_config = config::load_config().map_err(anyhow::Error::msg)?;
    tracing::info!("Server will listen on {}:{}", app_config.server.host, app_config.server.port);

    // Missing data directory is not fatal, searches just come back empty / 数据目录不存在时搜索结果为空
    let data_dir = app_config.get_data_dir();
    if data_dir.exists() {
        tracing::info!("Serving messages from {:?}", data_dir);
    } else {
        tracing::warn!("Data directory {:?} does not exist, searches will return nothing", data_dir);
    }

    let state = Arc::new(AppState::from_config(&app_config));
    let app = api::build_router(state);

    let bind_addr = app_config.get_bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    tracing::info!("Server running at http://{}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
