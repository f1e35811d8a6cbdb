/// Address and port the HTTP server binds to, e.g. `0.0.0.0:8080`
pub const LISTEN_ADDRESS: &str = "LISTEN_ADDRESS";
/// Path of the JSON file backing the board's key-value store when no remote store is configured
pub const BOARD_STORE_PATH: &str = "BOARD_STORE_PATH";
/// Base URL of a remote key-value service. When set, it takes precedence over [BOARD_STORE_PATH]
/// and the board persists through `GET`/`PUT`/`DELETE {base}/values/{key}`
pub const BOARD_STORE_URL: &str = "BOARD_STORE_URL";
/// Log level configuration for the application. For formatting info, see [tracing_subscriber's EnvFilter documentation](https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html)
pub const LOG_LEVEL: &str = "LOG_LEVEL";

/// OpenTelemetry span export URL. Should be http://localhost:4317 by default, as the service should
/// have an OpenTelemetry collector sidecar which directs metrics to the correct place
pub const OTEL_SPAN_EXPORT_URL: &str = "OTEL_SPAN_EXPORT_URL";
/// OpenTelemetry metrics export URL. Should be http://localhost:4317 by default, as the service should
/// have an OpenTelemetry collector sidecar which directs metrics to the correct place
pub const OTEL_METRIC_EXPORT_URL: &str = "OTEL_METRIC_EXPORT_URL";
