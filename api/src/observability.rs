use anyhow::Result;
use prometheus::Registry;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{ApiConfig, LogFormat};
use crate::metrics;

pub struct Observability {
    pub registry: Registry,
}

impl Observability {
    pub fn init(config: &ApiConfig) -> Result<Self> {
        let registry = Registry::new_custom(Some("campus".into()), None)?;
        metrics::register_all(&registry)?;

        init_tracing(&config.log_filter, config.log_format)?;

        tracing::info!("Observability stack initialized (Prometheus + {:?} logs)", config.log_format);
        tracing::info!("Validation configuration loaded: {}", config);
        Ok(Self { registry })
    }
}

/// Installs the global subscriber; `RUST_LOG` wins over `default_filter`
pub fn init_tracing(default_filter: &str, format: LogFormat) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    match format {
        LogFormat::Text => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init()?,
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_an_error_not_a_panic() {
        let _ = init_tracing("api=debug", LogFormat::Text);
        assert!(init_tracing("api=debug", LogFormat::Json).is_err());
    }
}
