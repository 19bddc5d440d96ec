//src/main.rs

use std::time::Duration;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use mseal_console::config::{AppState, ConsoleConfig};

// Intervalo da limpeza de workspaces ociosos
const EVICTION_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logger compacto; RUST_LOG ajusta o nível (padrão: info)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    let config = ConsoleConfig::from_env()?;
    let bind_addr = config.bind_addr.clone();
    tracing::info!(api = %config.api_base_url, page_size = config.page_size, "configuração carregada");

    let app_state = AppState::new(config)?;

    // Sessões sem uso por muito tempo perdem o cache
    let sessions = app_state.sessions.clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(EVICTION_INTERVAL);
        loop {
            ticker.tick().await;
            let evicted = sessions.evict_idle().await;
            if evicted > 0 {
                tracing::debug!(evicted, "workspaces ociosos removidos");
            }
        }
    });

    let app = mseal_console::app(app_state);

    let listener = TcpListener::bind(&bind_addr).await?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);
    tracing::info!("📚 Swagger em http://{}/swagger-ui", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
