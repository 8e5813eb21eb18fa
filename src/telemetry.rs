//! Logging setup, powered by tracing-subscriber.
//!
//! `RUST_LOG` wins over the configured level so a single run can be turned
//! up without touching `.env`.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::config::LoggingConfig;

/// Noisy dependency targets and the level they are capped at.
const NOISY_TARGETS: &[(&str, &str)] = &[
    ("hyper", "warn"),
    ("reqwest", "warn"),
    ("h2", "warn"),
];

/// Builds the filter from `RUST_LOG` if set, otherwise from `level`.
pub fn build_env_filter(level: &str) -> Result<EnvFilter, tracing_subscriber::filter::ParseError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    let mut directives = vec![level.to_string()];
    for (target, lvl) in NOISY_TARGETS {
        directives.push(format!("{}={}", target, lvl));
    }
    EnvFilter::try_new(directives.join(","))
}

/// Installs the global subscriber.
///
/// Returns an error if the filter does not parse or a subscriber is
/// already installed.
pub fn init(config: &LoggingConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = build_env_filter(&config.level)?;

    let fmt_layer = if config.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .compact()
            .with_target(true)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .try_init()?;

    Ok(())
}
