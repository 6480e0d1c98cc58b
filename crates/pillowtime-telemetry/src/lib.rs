//! Logging and trace export for Pillowtime
//!
//! Logs go to stdout through `tracing-subscriber`; spans are additionally
//! exported over OTLP when `[telemetry.otlp]` is configured.

mod metadata;

use opentelemetry::global;
use opentelemetry::trace::TracerProvider;
use opentelemetry_otlp::{SpanExporter, WithExportConfig};
use opentelemetry_sdk::trace::{Sampler, SdkTracerProvider};
use pillowtime_config::{ExportProtocol, LogFormat, OtlpConfig, TelemetryConfig};
use tracing_subscriber::{
    EnvFilter, Layer, Registry,
    layer::{Layered, SubscriberExt},
    util::SubscriberInitExt,
};

type FmtLayer = Box<dyn Layer<Layered<EnvFilter, Registry>> + Send + Sync>;

/// Flushes pending spans when dropped; hold it for the life of the process
pub struct TelemetryGuard {
    tracer_provider: Option<SdkTracerProvider>,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        if let Some(provider) = self.tracer_provider.take()
            && let Err(e) = provider.shutdown()
        {
            eprintln!("failed to shut down tracer provider: {e}");
        }
    }
}

/// Install the global subscriber
///
/// `RUST_LOG` wins over `default_filter` when set.
///
/// # Errors
///
/// Returns an error if the OTLP exporter cannot be built
pub fn init(config: Option<&TelemetryConfig>, default_filter: &str) -> anyhow::Result<TelemetryGuard> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let format = config.map_or(LogFormat::Text, |c| c.log_format);

    let tracer_provider = match config {
        Some(telemetry) => match &telemetry.otlp {
            Some(otlp) => Some(tracer_provider(telemetry, otlp)?),
            None => None,
        },
        None => None,
    };

    let otel_layer = tracer_provider.as_ref().map(|provider| {
        global::set_tracer_provider(provider.clone());
        tracing_opentelemetry::layer().with_tracer(provider.tracer("pillowtime"))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer(format))
        .with(otel_layer)
        .init();

    Ok(TelemetryGuard { tracer_provider })
}

fn fmt_layer(format: LogFormat) -> FmtLayer {
    let layer = tracing_subscriber::fmt::layer().with_target(true);

    match format {
        LogFormat::Text => layer.boxed(),
        LogFormat::Json => layer.json().boxed(),
    }
}

fn sampler(otlp: &OtlpConfig) -> Sampler {
    let root = if otlp.sampling_rate >= 1.0 {
        Sampler::AlwaysOn
    } else if otlp.sampling_rate <= 0.0 {
        Sampler::AlwaysOff
    } else {
        Sampler::TraceIdRatioBased(otlp.sampling_rate)
    };

    if otlp.parent_based {
        Sampler::ParentBased(Box::new(root))
    } else {
        root
    }
}

fn tracer_provider(telemetry: &TelemetryConfig, otlp: &OtlpConfig) -> anyhow::Result<SdkTracerProvider> {
    let exporter = match otlp.protocol {
        ExportProtocol::Grpc => SpanExporter::builder()
            .with_tonic()
            .with_endpoint(otlp.endpoint.as_str())
            .build(),
        ExportProtocol::HttpProto => SpanExporter::builder()
            .with_http()
            .with_endpoint(otlp.endpoint.as_str())
            .build(),
    }
    .map_err(|e| anyhow::anyhow!("failed to build OTLP span exporter for {}: {e}", otlp.endpoint))?;

    Ok(SdkTracerProvider::builder()
        .with_resource(metadata::build_resource(telemetry))
        .with_sampler(sampler(otlp))
        .with_batch_exporter(exporter)
        .build())
}
