use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use recipe_api::{AppState, Server, api};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);

    info!(port, "starting recipe api");

    let state = AppState::seeded();
    if let Err(e) = Server::bind(&format!("0.0.0.0:{port}")).serve(api::router(), state).await {
        error!("server error: {e}");
        std::process::exit(1);
    }
}
