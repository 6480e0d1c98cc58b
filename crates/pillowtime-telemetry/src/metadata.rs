use opentelemetry::KeyValue;
use opentelemetry_sdk::Resource;
use opentelemetry_semantic_conventions::resource as semconv;
use pillowtime_config::TelemetryConfig;

/// Resource attached to every exported span
pub fn build_resource(config: &TelemetryConfig) -> Resource {
    let extra = config
        .resource_attributes
        .iter()
        .map(|(key, value)| KeyValue::new(key.clone(), value.clone()));

    Resource::builder()
        .with_service_name(config.service_name.clone())
        .with_attribute(KeyValue::new(semconv::SERVICE_VERSION, env!("CARGO_PKG_VERSION")))
        .with_attributes(extra)
        .build()
}
