use crate::domain::board::driving_ports::BoardPort;
use crate::{SharedData, domain, persistence};
use axum::Router;
use axum::body::Body;
use axum::http::{Request, header};
use dotenv::dotenv;
use lazy_static::lazy_static;
use rand::{Rng, thread_rng};
use std::path::PathBuf;
use std::sync::Arc;
use std::{env, future::Future};
use tokio::runtime::Runtime;
use tokio::sync::RwLock;

lazy_static! {
    static ref TOKIO_RT: Runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Tokio runtime failed to initialize");
}

/// Allocates a data file path in the temp directory unique to one test
fn scratch_store_path() -> PathBuf {
    let mut rng = thread_rng();
    let store_id: u32 = rng.gen_range(10_000..99_999);

    env::temp_dir().join(format!("retro-board-test-{store_id}.json"))
}

/// Provisions a scratch file for a test to use as its backing store, hands a connectivity
/// handle over that file to the test body, then deletes the file once the test completes.
pub fn prepare_store_and_test<F, R>(test_fn: F)
where
    R: Future<Output = ()>,
    F: FnOnce(persistence::ExternalConnectivity) -> R,
{
    if dotenv().is_err() {
        println!("Test is running without .env file.");
    }

    TOKIO_RT.block_on(async move {
        let store_path = scratch_store_path();
        let ext_cxn = persistence::ExternalConnectivity::new(persistence::StoreConfig::File(
            store_path.clone(),
        ));

        test_fn(ext_cxn).await;

        let cleanup_result = tokio::fs::remove_file(&store_path).await;
        if cleanup_result.is_err() {
            println!(
                "Warning: failed to remove test store {}, you may need to do it manually.",
                store_path.display()
            );
        }
    });
}

/// Assembles the full application router over [ext_cxn] the same way the server entry point
/// does, restoring board state from whatever the backing store already holds
pub async fn build_app(ext_cxn: persistence::ExternalConnectivity) -> Router {
    let mut hydrate_cxn = ext_cxn.clone();
    let mut board = domain::board::BoardController::new();
    let session_read = persistence::kv_session_store::KvSessionReader {};
    let card_read = persistence::kv_card_store::KvCardReader {};
    let item_read = persistence::kv_action_item_store::KvActionItemReader {};
    board
        .hydrate(&mut hydrate_cxn, &session_read, &card_read, &item_read)
        .await
        .expect("Board state failed to hydrate from the test store");

    let shared_data = Arc::new(SharedData {
        ext_cxn,
        board: RwLock::new(board),
    });

    crate::application_router(shared_data)
}

/// Builds a bodyless request against [path]
pub fn empty_request(method: &str, path: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(path)
        .body(Body::empty())
        .expect("Bodyless request failed to build")
}

/// Builds a request against [path] carrying [body] as JSON
pub fn json_request(method: &str, path: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("JSON request failed to build")
}
