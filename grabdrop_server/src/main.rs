use anyhow::Result;
use grabdrop_core::{AppConfig, TransferCoordinator, UploadStorage};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

mod app;
mod responses;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file (for GRABDROP_CONFIG etc.)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = AppConfig::load();
    tracing::info!(
        "Loaded config: port {}, uploads at {}, {} friend pair(s)",
        config.listen_port,
        config.uploads_dir.display(),
        config.friends.len()
    );

    // The friend graph is fixed for the lifetime of the process
    let friends = config.friend_graph();
    let storage = UploadStorage::new(&config.uploads_dir);
    let coordinator = Arc::new(TransferCoordinator::new(friends, storage));

    let router = app::create_router(coordinator, &config.uploads_dir);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.listen_port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Transfer server listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Transfer server shutting down gracefully");
        })
        .await?;

    Ok(())
}
