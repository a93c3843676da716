//! Logging setup
//!
//! Diagnostics go through `tracing` and are written to stderr, so they never
//! interleave with the text a [`crate::terminal::Terminal`] writes to stdout.
//! Format and filter are chosen at runtime:
//!
//! * `TERMKIT_LOG_FORMAT` - `json` for structured output, anything else for text
//! * `TERMKIT_LOG` - filter directive (`debug`, `termkit_core=trace`, ...)
//! * `RUST_LOG` - fallback filter when `TERMKIT_LOG` is unset
//! * `TERMKIT_LOG_SPAN_EVENTS` - comma separated span events (`new,close`)
//!
//! Without any of these only warnings and errors are shown.

use anyhow::Result;
use std::{io, sync::Once};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

const DEFAULT_FILTER: &str = "warn";

/// Install the global subscriber. Later calls are no-ops.
///
/// `format` and `level` take precedence over the environment.
///
/// ```rust
/// use termkit_core::logging;
///
/// logging::init(None, None).expect("Failed to initialize logging");
/// logging::init(Some("json"), Some("debug")).expect("Second call is a no-op");
/// assert!(logging::is_initialized());
/// ```
pub fn init(format: Option<&str>, level: Option<&str>) -> Result<()> {
    INIT.call_once(|| {
        let filter = create_env_filter(level);

        let env_format = std::env::var("TERMKIT_LOG_FORMAT").ok();
        let effective_format = format.or(env_format.as_deref()).unwrap_or("text");
        let span_events = span_events_for_format(effective_format);

        match effective_format {
            "json" => {
                tracing_subscriber::registry()
                    .with(
                        fmt::layer()
                            .json()
                            .with_target(true)
                            .with_span_events(span_events)
                            .with_writer(io::stderr),
                    )
                    .with(filter)
                    .init();
            }
            _ => {
                tracing_subscriber::registry()
                    .with(
                        fmt::layer()
                            .with_target(true)
                            .with_span_events(span_events)
                            .with_writer(io::stderr),
                    )
                    .with(filter)
                    .init();
            }
        }

        tracing::debug!("Logging initialized with format: {}", effective_format);
    });

    Ok(())
}

fn create_env_filter(level: Option<&str>) -> EnvFilter {
    let spec = level
        .map(str::to_string)
        .or_else(|| std::env::var("TERMKIT_LOG").ok());

    match spec {
        Some(spec) => EnvFilter::try_new(&spec).unwrap_or_else(|_| {
            tracing::warn!(
                "Invalid log filter '{}', using default '{}'",
                spec,
                DEFAULT_FILTER
            );
            EnvFilter::new(DEFAULT_FILTER)
        }),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    }
}

fn span_events_for_format(format: &str) -> fmt::format::FmtSpan {
    use fmt::format::FmtSpan;

    if let Ok(raw) = std::env::var("TERMKIT_LOG_SPAN_EVENTS") {
        let mut acc = FmtSpan::NONE;
        for token in raw.split(&[',', '|'][..]).map(|t| t.trim().to_lowercase()) {
            acc |= match token.as_str() {
                "new" => FmtSpan::NEW,
                "close" => FmtSpan::CLOSE,
                "enter" => FmtSpan::ENTER,
                "exit" => FmtSpan::EXIT,
                "active" => FmtSpan::ACTIVE,
                "full" => FmtSpan::FULL,
                _ => FmtSpan::NONE,
            };
        }
        return acc;
    }

    match format {
        "json" => FmtSpan::NEW | FmtSpan::CLOSE,
        _ => FmtSpan::NONE,
    }
}

/// Whether [`init`] has already run
pub fn is_initialized() -> bool {
    INIT.is_completed()
}
