use dotenv::dotenv;

use portal::config::AppConfig;
use portal::logger::init_logger;
use portal::state::AppState;

#[tokio::main]
async fn main() {
    dotenv().ok();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };
    init_logger(&config.log_level, config.log_dir.as_deref());

    let addr = config.addr;
    tracing::info!(backend = %config.backend_url, static_dir = %config.static_dir, "starting portal");

    let state = match AppState::new(config) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(error = %e, "failed to build backend client");
            std::process::exit(1);
        }
    };
    let app = portal::app(state);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(%addr, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };
    tracing::info!("🚀 Listening on http://{}", addr);

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server stopped");
    }
}
