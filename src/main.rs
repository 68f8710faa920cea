use log::{error, info};
use offload::Fibonacci;
use service::{config::Config, logging::Logger, AppState};
use std::sync::Arc;

// A single control thread accepts and multiplexes every connection. Offloaded
// computations run on the runtime's blocking pool; `/fibonacci-block/:n` does not.
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let config = Config::new();
    Logger::init_logger(&config);

    info!(
        "Starting event loop demos [{}:{}]...",
        config.interface(),
        config.port
    );

    let app_state = AppState::new(config, Arc::new(Fibonacci));

    if let Err(e) = web::init_server(app_state).await {
        error!("Server exited with an error: {e}");
        std::process::exit(1);
    }
}
