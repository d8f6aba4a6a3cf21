use std::path::Path;

use tracing::info;

use crate::api;
use crate::cli::commands::ServeArgs;
use crate::config::load_config;
use crate::errors::CoastError;

pub async fn handle_serve(args: ServeArgs) -> Result<(), CoastError> {
    let config = load_config(args.config.as_deref().map(Path::new)).await?;
    let server = config.server();
    let host = args.host.unwrap_or(server.host);
    let port = args.port.unwrap_or(server.port);
    info!(host = %host, port, "Starting API server");

    let state = api::create_app_state(config).await?;
    let app = api::build_router(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| CoastError::Internal(format!("Server error: {}", e)))?;

    Ok(())
}
