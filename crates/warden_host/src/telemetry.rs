//! Telemetry and observability setup.
//!
//! Provides [`Telemetry`], a builder that configures the `tracing`
//! subscriber for an application embedding a [`Host`](crate::Host). The
//! host's teardown fan-out emits structured events; installing a subscriber
//! through this builder is how they become visible.
//!
//! # Example
//!
//! ```
//! use warden_host::{LogFormat, Telemetry};
//! use tracing::Level;
//!
//! Telemetry::new()
//!     .with_level(Level::DEBUG)
//!     .with_format(LogFormat::Compact)
//!     .init();
//!
//! tracing::info!("host starting");
//! ```

use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

// ─────────────────────────────────────────────────────────────────────────────
// LogFormat
// ─────────────────────────────────────────────────────────────────────────────

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable colored output (default).
    #[default]
    Pretty,
    /// Compact single-line output.
    Compact,
    /// JSON structured output for log aggregation.
    Json,
}

// ─────────────────────────────────────────────────────────────────────────────
// Telemetry
// ─────────────────────────────────────────────────────────────────────────────

/// Builder for the global `tracing` subscriber.
///
/// # Configuration Options
///
/// ```
/// use warden_host::{LogFormat, Telemetry};
/// use tracing::Level;
///
/// // Development: Pretty colored output with debug level
/// let dev = Telemetry::new()
///     .with_level(Level::DEBUG)
///     .with_format(LogFormat::Pretty)
///     .with_span_events(true);  // Show span enter/exit
///
/// // Production: JSON output for log aggregation
/// let prod = Telemetry::new()
///     .with_level(Level::INFO)
///     .with_format(LogFormat::Json)
///     .with_env_filter("warden=info,hyper=warn");
/// ```
#[derive(Clone)]
pub struct Telemetry {
    /// Maximum log level.
    level: Level,
    /// Output format.
    format: LogFormat,
    /// Environment filter (e.g., "warden=debug,hyper=warn").
    env_filter: Option<String>,
    /// Whether to include span events (enter/exit).
    span_events: bool,
}

impl Default for Telemetry {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            format: LogFormat::Pretty,
            env_filter: None,
            span_events: false,
        }
    }
}

impl Telemetry {
    /// Creates a new `Telemetry` builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum log level.
    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Sets the output format.
    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets a custom environment filter string.
    ///
    /// Format: `target=level,target=level,...`
    ///
    /// # Example
    ///
    /// ```
    /// use warden_host::Telemetry;
    ///
    /// Telemetry::new()
    ///     .with_env_filter("warden=debug,hyper=warn");
    /// ```
    #[must_use]
    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Enables span enter/exit events in output.
    #[must_use]
    pub fn with_span_events(mut self, enabled: bool) -> Self {
        self.span_events = enabled;
        self
    }

    /// Installs the global subscriber.
    ///
    /// Safe to call more than once; later calls leave the first subscriber
    /// in place.
    pub fn init(&self) {
        // Build the environment filter
        let env_filter = match &self.env_filter {
            Some(filter) => {
                EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(self.level.as_str()))
            }
            None => EnvFilter::new(self.level.as_str()),
        };

        // Build span events configuration
        let span_events = if self.span_events {
            FmtSpan::ENTER | FmtSpan::EXIT
        } else {
            FmtSpan::NONE
        };

        // Initialize subscriber based on format
        // Note: try_init().ok() ignores errors if already initialized
        match self.format {
            LogFormat::Pretty => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(
                        tracing_subscriber::fmt::layer()
                            .pretty()
                            .with_span_events(span_events),
                    )
                    .try_init()
                    .ok();
            }
            LogFormat::Compact => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(
                        tracing_subscriber::fmt::layer()
                            .compact()
                            .with_span_events(span_events),
                    )
                    .try_init()
                    .ok();
            }
            LogFormat::Json => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(
                        tracing_subscriber::fmt::layer()
                            .json()
                            .with_span_events(span_events),
                    )
                    .try_init()
                    .ok();
            }
        }

        tracing::debug!(
            level = %self.level,
            format = ?self.format,
            "telemetry initialized"
        );
    }
}
