pub mod api;
pub mod config;
pub mod content;
pub mod error;
pub mod ingest;
pub mod notifier;
pub mod sanitizer;
pub mod state;
pub mod storage;

use tracing_subscriber::{EnvFilter, fmt::time::ChronoLocal};

pub async fn run() {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S%.3f".to_string()))
        .with_env_filter(EnvFilter::from_env("NEWSDESK_LOG"))
        .init();

    let config = config::load_from_env();
    let pool = storage::init_db_from_env().await;

    let listen_addr = config.listen_addr.clone();
    let state = state::AppState::new(pool, config);

    api::run_server(state, &listen_addr).await
}
