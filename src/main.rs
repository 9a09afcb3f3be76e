use tracing::info;
use tracing_subscriber::FmtSubscriber;

use attendance_gate::{app, errors::Result, state::AppState};

#[tokio::main]
async fn main() -> Result<()> {
    tracing::subscriber::set_global_default(FmtSubscriber::default()).unwrap();
    let state = AppState::init().await?;

    let port = std::env::var("PORT").unwrap_or_else(|_| "3587".to_string());

    info!("Starting server");

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
    info!("Serving admin gate at http://{}", listener.local_addr()?);
    axum::serve(listener, app(state)).await?;

    Ok(())
}
