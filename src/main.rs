use crate::domain::board::driving_ports::BoardPort;
use anyhow::Context;
use axum::Router;
use axum::extract::State;
use dotenv::dotenv;
use std::env;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tracing::{info, warn};

mod api;
mod app_env;
mod domain;
mod dto;
mod external_connections;
mod logging;
mod persistence;
mod routing_utils;

/// Contains data to be shared across request handlers
pub struct SharedData {
    pub ext_cxn: persistence::ExternalConnectivity,
    pub board: RwLock<domain::board::BoardController>,
}

/// Type alias for extracting [SharedData] in request handlers
pub type AppState = State<Arc<SharedData>>;

/// Address the server binds to when [app_env::LISTEN_ADDRESS] isn't set
const DEFAULT_LISTEN_ADDRESS: &str = "0.0.0.0:8080";
/// Data file backing the board when neither store variable is set
const DEFAULT_STORE_PATH: &str = "retro-board-data.json";

/// Picks the key-value backend for the board from the environment. A configured
/// remote store wins over a file path.
fn store_config_from_env() -> persistence::StoreConfig {
    if let Ok(store_url) = env::var(app_env::BOARD_STORE_URL) {
        return persistence::StoreConfig::Remote(store_url);
    }

    let store_path =
        env::var(app_env::BOARD_STORE_PATH).unwrap_or_else(|_| DEFAULT_STORE_PATH.to_owned());
    persistence::StoreConfig::File(store_path.into())
}

/// Assembles the application's router around the given shared state
pub fn application_router(shared_data: Arc<SharedData>) -> Router {
    let base_router = Router::new()
        .merge(api::swagger_main::build_documentation())
        .nest("/session", api::session::session_routes())
        .nest("/board", api::board::board_routes())
        .nest("/users", api::users::user_routes())
        .with_state(shared_data);

    logging::attach_tracing_http(base_router)
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenv().ok();

    let env_filter = logging::init_env_filter();
    let otel_span_export_url = env::var(app_env::OTEL_SPAN_EXPORT_URL).ok();
    let otel_metric_export_url = env::var(app_env::OTEL_METRIC_EXPORT_URL).ok();
    let otel_exporters = match (otel_span_export_url, otel_metric_export_url) {
        (Some(span_url), Some(metric_url)) => {
            Some(logging::init_exporters(&span_url, &metric_url))
        }
        _ => None,
    };
    logging::setup_logging_and_tracing(env_filter, otel_exporters);

    let store_config = store_config_from_env();
    info!("Board data lives in {store_config:?}");
    let ext_cxn = persistence::ExternalConnectivity::new(store_config);

    // A fresh launch picks up whatever session and collections the store already holds
    let mut board = domain::board::BoardController::new();
    let mut hydrate_cxn = ext_cxn.clone();
    let session_read = persistence::kv_session_store::KvSessionReader {};
    let card_read = persistence::kv_card_store::KvCardReader {};
    let item_read = persistence::kv_action_item_store::KvActionItemReader {};
    let hydrate_result = board
        .hydrate(&mut hydrate_cxn, &session_read, &card_read, &item_read)
        .await;
    match hydrate_result {
        Ok(()) => {
            if let Some(user) = board.current_user() {
                info!("Restored {}'s session from the store", user.name);
            }
        }
        Err(hydrate_err) => {
            warn!("Could not restore board state from the store, starting signed out: {hydrate_err}");
        }
    }

    let shared_data = Arc::new(SharedData {
        ext_cxn,
        board: RwLock::new(board),
    });
    let router = application_router(shared_data);

    let listen_address =
        env::var(app_env::LISTEN_ADDRESS).unwrap_or_else(|_| DEFAULT_LISTEN_ADDRESS.to_owned());
    info!("Starting server on {listen_address}.");
    let listener = TcpListener::bind(&listen_address)
        .await
        .context("binding the listen address")?;
    axum::serve(listener, router)
        .await
        .context("serving the API")?;

    Ok(())
}
