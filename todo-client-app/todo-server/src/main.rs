use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing::{error, info};

use todo_api::{build_router, state::AppState, views::Views};
use todo_core::services::TodoService;
use todo_shared::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Load configuration
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize telemetry
    todo_shared::telemetry::init_telemetry(&config.log)?;

    info!("Todo server starting ({} environment)...", config.app.env);

    // Connect to storage
    let repo = match todo_infrastructure::connect(&config.database).await {
        Ok(repo) => repo,
        Err(e) => {
            error!("Failed to initialise todo storage: {}", e);
            return Err(e).context("todo storage");
        }
    };

    // Create App State
    let views = Views::new().context("loading page templates")?;
    let state = AppState {
        todos: TodoService::new(repo),
        views: Arc::new(views),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state);

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Todo server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    const MENU_CSS: &str = include_str!("../static/assets/todo-menu.css");

    #[test]
    fn test_hidden_menu_links_are_not_displayed() {
        assert!(MENU_CSS.contains(".context-menu a[hidden]"));
        assert!(MENU_CSS.contains(".context-menu[hidden]"));
    }
}
