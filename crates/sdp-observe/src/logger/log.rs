//! Subscriber assembly: one filter, one output layer.

use time::{UtcOffset, format_description::well_known::Rfc3339};
use tracing_subscriber::{
    EnvFilter, Layer, Registry,
    fmt::{self, time::OffsetTime},
    layer::{Layered, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::logger::{config::LoggerConfig, error::LoggerError, format::LoggerFormat};

type Filtered = Layered<EnvFilter, Registry>;
type Output = Box<dyn Layer<Filtered> + Send + Sync + 'static>;

/// HTTP plumbing under the engine client; kept at `warn` unless the level names it.
pub(crate) const TRANSPORT_TARGETS: &[&str] = &["hyper", "hyper_util", "h2", "reqwest", "rustls"];

pub(crate) fn install(cfg: &LoggerConfig) -> Result<(), LoggerError> {
    let filter = build_filter(&cfg.level)?;
    let output = output_layer(cfg)?;

    tracing_subscriber::registry()
        .with(filter)
        .with(output)
        .try_init()
        .map_err(|e| {
            let msg = e.to_string();
            if msg.contains("global default") {
                LoggerError::AlreadyInitialized
            } else {
                LoggerError::InitializationFailed(msg)
            }
        })
}

/// `level` plus `<transport>=warn` for every transport target the level leaves unmentioned.
pub(crate) fn build_filter(level: &str) -> Result<EnvFilter, LoggerError> {
    let mentioned: Vec<&str> = level
        .split(',')
        .filter_map(|d| d.split_once('=').map(|(target, _)| target.trim()))
        .collect();

    let mut directives = vec![level.trim().to_string()];
    directives.extend(
        TRANSPORT_TARGETS
            .iter()
            .filter(|t| !mentioned.iter().any(|m| *m == **t || m.starts_with(&format!("{t}::"))))
            .map(|t| format!("{t}=warn")),
    );

    EnvFilter::try_new(directives.join(",")).map_err(|_| LoggerError::InvalidLogLevel(level.to_string()))
}

fn output_layer(cfg: &LoggerConfig) -> Result<Output, LoggerError> {
    match cfg.format {
        LoggerFormat::Text => Ok(fmt::layer()
            .with_ansi(cfg.use_color)
            .with_target(cfg.with_targets)
            .with_timer(local_rfc3339())
            .boxed()),
        LoggerFormat::Json => Ok(fmt::layer()
            .json()
            .with_ansi(false)
            .with_current_span(true)
            .with_target(cfg.with_targets)
            .with_timer(local_rfc3339())
            .boxed()),
        LoggerFormat::Journald => journald_layer(),
    }
}

// Local offset lookup fails once other threads exist; fall back to UTC.
fn local_rfc3339() -> OffsetTime<Rfc3339> {
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    OffsetTime::new(offset, Rfc3339)
}

#[cfg(all(target_os = "linux", feature = "journald"))]
fn journald_layer() -> Result<Output, LoggerError> {
    let layer = tracing_journald::layer()
        .map_err(|e| LoggerError::InitializationFailed(format!("journald: {e}")))?
        .with_syslog_identifier("sdp-master".to_string());
    Ok(layer.boxed())
}

#[cfg(not(all(target_os = "linux", feature = "journald")))]
fn journald_layer() -> Result<Output, LoggerError> {
    Err(LoggerError::JournaldNotSupported)
}
