mod config;

use anyhow::Result;
use config::ObservabilityConfig;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub fn init_observability(component: &str) -> Result<()> {
    let config = ObservabilityConfig::from_env(component);

    // RUST_LOG wins over LOG_LEVEL when both are set.
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_directive));

    // Local time so `TZ=...` is reflected in log timestamps.
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339());

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
        .try_init()?;

    for warning in &config.warnings {
        warn!(
            service = %config.service_context.service_name,
            environment = %config.service_context.environment,
            component = %config.service_context.component,
            warning = %warning,
            "Observability config warning"
        );
    }

    info!(
        service = %config.service_context.service_name,
        environment = %config.service_context.environment,
        component = %config.service_context.component,
        "Tracing initialized"
    );

    Ok(())
}
