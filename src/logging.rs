use crate::app_env;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use opentelemetry::trace::TracerProvider;
use opentelemetry::{KeyValue, global};
use opentelemetry_http::HeaderExtractor;
use opentelemetry_otlp::{MetricExporter, SpanExporter, WithExportConfig};
use opentelemetry_sdk::metrics::{PeriodicReader, SdkMeterProvider};
use opentelemetry_sdk::propagation::TraceContextPropagator;
use opentelemetry_sdk::trace::Tracer;
use opentelemetry_sdk::{Resource, runtime};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing::{Span, debug, debug_span, field};
use tracing_opentelemetry::{MetricsLayer, OpenTelemetryLayer, OpenTelemetrySpanExt};
use tracing_subscriber::{EnvFilter, prelude::*, registry};

/// Service name reported to OpenTelemetry collectors
const SERVICE_NAME: &str = "retro-board";

/// The OpenTelemetry pipelines that ship spans and metrics out of the process
pub struct OtelExporters {
    pub tracer: Tracer,
    pub metrics: SdkMeterProvider,
}

/// Wraps the router in an HTTP tracing layer. Every request gets its own span, joined to an
/// upstream trace when the caller sent W3C trace context headers.
pub fn attach_tracing_http<T>(router: Router<T>) -> Router<T>
where
    T: Clone + Send + Sync + 'static,
{
    router.layer(
        ServiceBuilder::new().layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let http_span = debug_span!(
                        "http_request",
                        method = %request.method(),
                        path = request.uri().path(),
                        status = field::Empty,
                    );

                    let upstream_trace = global::get_text_map_propagator(|propagator| {
                        propagator.extract(&HeaderExtractor(request.headers()))
                    });
                    http_span.set_parent(upstream_trace);

                    http_span
                })
                .on_response(
                    |response: &Response<Body>, _latency: Duration, span: &Span| {
                        span.record("status", field::display(response.status()));
                        debug!("finished handling request");
                    },
                ),
        ),
    )
}

/// Spins up background OTLP exporters for spans and metrics, pointed at gRPC collector
/// endpoints (usually http://localhost:4317 when running next to a collector sidecar).
pub fn init_exporters(otlp_traces_endpoint: &str, otlp_metrics_endpoint: &str) -> OtelExporters {
    let otel_resource = Resource::new([KeyValue::new("service.name", SERVICE_NAME)]);

    let span_exporter = SpanExporter::builder()
        .with_tonic()
        .with_endpoint(otlp_traces_endpoint)
        .build()
        .expect("span exporter construction failed");
    let metric_exporter = MetricExporter::builder()
        .with_tonic()
        .with_endpoint(otlp_metrics_endpoint)
        .build()
        .expect("metric exporter construction failed");

    let tracer = opentelemetry_sdk::trace::TracerProvider::builder()
        .with_batch_exporter(span_exporter, runtime::Tokio)
        .with_resource(otel_resource.clone())
        .build()
        .tracer(SERVICE_NAME);
    let metrics = SdkMeterProvider::builder()
        .with_reader(PeriodicReader::builder(metric_exporter, runtime::Tokio).build())
        .with_resource(otel_resource)
        .build();

    OtelExporters { tracer, metrics }
}

/// Builds the log filter from [app_env::LOG_LEVEL], falling back to the "info" level when
/// the variable is unset.
pub fn init_env_filter() -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .with_env_var(app_env::LOG_LEVEL)
        .from_env()
        .expect("building the logging filter failed")
}

/// Installs the global tracing subscriber. Stdout always receives JSON logs filtered by
/// [env_filter]. When [otel] is present, spans and metrics down to the "debug" level are
/// additionally forwarded to the OpenTelemetry pipelines.
pub fn setup_logging_and_tracing(env_filter: EnvFilter, otel: Option<OtelExporters>) {
    global::set_text_map_propagator(TraceContextPropagator::new());

    if let Some(exporters) = otel {
        registry()
            .with(LevelFilter::DEBUG)
            .with(OpenTelemetryLayer::new(exporters.tracer))
            .with(MetricsLayer::new(exporters.metrics))
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_filter(env_filter),
            )
            .init();
    } else {
        registry()
            .with(LevelFilter::DEBUG)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_filter(env_filter),
            )
            .init();
    }
}
