//! # Logging
//!
//! `hbt` prints its results (MRZ records, QR payloads, ledgers) on stdout,
//! so every diagnostic goes to stderr. Piping `hbt pending ... | qrencode`
//! or `hbt mrz scan.txt | jq` stays clean at any log level.
//!
//! `RUST_LOG` overrides the built-in filter, e.g. to watch the extractor
//! reject frames:
//!
//! ```text
//! RUST_LOG=hbt_protocol::mrz=debug hbt mrz capture.txt
//! ```

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Shape of the lines written to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Compact human-readable lines for a terminal.
    Pretty,
    /// One JSON object per event, for scripts wrapping `hbt`.
    Json,
}

impl LogFormat {
    /// `json` (any case, surrounding whitespace ignored) selects JSON;
    /// anything else, including an empty `HBT_LOG_FORMAT`, is `Pretty`.
    pub fn from_str_lossy(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        }
    }
}

/// Install the global subscriber. Call once, before dispatching a command.
pub fn init_logging(default_filter: &str, format: LogFormat) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    match format {
        // A short-lived command: no thread ids or source locations, and the
        // target only matters to tell the CLI from the library.
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    fmt::layer()
                        .compact()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_file(false)
                        .with_line_number(false),
                )
                .init();
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_writer(std::io::stderr)
                        .with_current_span(false),
                )
                .init();
        }
    }

    tracing::debug!(?format, "logging initialized");
}
