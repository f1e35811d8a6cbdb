use axum::body;
use serde::de::DeserializeOwned;

/// Used in tests to pull the raw bytes out of an HTTP response body and deserialize
/// them into the requested type. Will panic and fail the test if either step fails somehow.
pub async fn deserialize_body<T: DeserializeOwned>(response_body: body::Body) -> T {
    let body_bytes = body::to_bytes(response_body, usize::MAX)
        .await
        .expect("Could not read data from response body!");

    serde_json::from_slice(&body_bytes).unwrap_or_else(|parse_err| {
        panic!(
            "Could not parse body content into data structure! Error: {}, Received body: {:?}",
            parse_err, body_bytes
        )
    })
}
