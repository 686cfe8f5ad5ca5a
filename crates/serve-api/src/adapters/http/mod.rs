mod handler;
mod params;

use std::path::Path;

use axum::{
    extract::Request,
    middleware::{self, Next},
    response::Response,
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{config::Config, core::connection::Store, error::AppResult};

pub use handler::ApiState;

/// `/api` plus a static file server for every other path.
pub fn router(state: ApiState, directory: &Path, verbose: bool) -> Router {
    let mut app = Router::new()
        .route("/api", get(handler::handle_query))
        .with_state(state)
        .fallback_service(ServeDir::new(directory));

    if verbose {
        app = app.layer(middleware::from_fn(log_request));
    }
    app.layer(TraceLayer::new_for_http())
}

pub async fn serve(config: Config) -> AppResult<()> {
    let state = ApiState {
        store: Store::new(&config.database),
        timeout: config.timeout,
    };
    let app = router(state, &config.directory, config.verbose);

    let listener = TcpListener::bind((config.ip_address.as_str(), config.port)).await?;
    tracing::info!("listening on {} ...", config.socket_addr());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn log_request(req: Request, next: Next) -> Response {
    tracing::info!(uri = %req.uri(), "serving");
    next.run(req).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
