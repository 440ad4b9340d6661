use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use roomify_assistant::config::AppConfig;
use roomify_assistant::routes;
use roomify_assistant::services::conversation::spawn_purge_task;
use roomify_assistant::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();
    let state = Arc::new(AppState::from_config(&config));

    spawn_purge_task(state.sessions.clone(), config.purge_interval);

    let app = routes::create_router(&config.static_dir).with_state(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Roomify assistant running at http://{addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
