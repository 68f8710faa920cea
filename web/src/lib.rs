use axum::http::{HeaderValue, Method};
use log::*;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};

pub use error::Error;
pub use service::AppState;

mod controller;
mod error;
mod params;
pub mod router;

/// Binds the configured interface and port and serves every route until the listener fails.
pub async fn init_server(app_state: AppState) -> std::io::Result<()> {
    let listener = TcpListener::bind(app_state.config.listen_addr()).await?;
    serve(listener, app_state).await
}

/// Serves every route on an already bound listener.
pub async fn serve(listener: TcpListener, app_state: AppState) -> std::io::Result<()> {
    let cors_layer = cors_layer(&app_state.config.allowed_origins);
    let app = router::define_routes(app_state).layer(cors_layer);

    info!("Server running on {}", listener.local_addr()?);
    axum::serve(listener, app).await
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors_layer = CorsLayer::new().allow_methods([Method::GET]);

    if allowed_origins.iter().any(|origin| origin == "*") {
        warn!("CORS allows any origin");
        return cors_layer.allow_origin(AllowOrigin::any());
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring invalid CORS origin {origin:?}: {e}");
                None
            }
        })
        .collect();

    debug!("CORS allowed origins: {allowed_origins:?}");

    cors_layer.allow_origin(AllowOrigin::list(origins))
}
