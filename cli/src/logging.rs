//! # Diagnostics
//!
//! `nova-sign` logs through `tracing`. Output goes to stderr, never stdout:
//! `sign-bytes --output raw` writes the exact bytes a wallet or HSM must
//! sign, and a stray log line there would corrupt them.
//!
//! The level comes from `--log-level` (or `NOVA_LOG_LEVEL`), unless
//! `RUST_LOG` is set, which wins. At `debug` the library reports every
//! registration, dispatch and verified signer:
//!
//! ```text
//! nova-sign --log-level nova_auth=debug verify --tx tx.json --accounts accounts.json
//! ```

use std::io::IsTerminal;

use anyhow::{anyhow, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Compact human-readable lines.
    Pretty,
    /// One JSON object per line, for wrapping `nova-sign` in scripts.
    Json,
}

impl LogFormat {
    /// `"json"` (any case) selects JSON; anything else is human output.
    pub fn from_str_lossy(s: &str) -> Self {
        if s.eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        }
    }
}

/// `RUST_LOG` if set, otherwise `level`. A directive string that does not
/// parse is an error rather than a silently dropped filter.
pub fn build_filter(level: &str) -> Result<EnvFilter> {
    match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(directives) if !directives.trim().is_empty() => EnvFilter::try_new(&directives)
            .map_err(|e| anyhow!("invalid RUST_LOG {:?}: {}", directives, e)),
        _ => EnvFilter::try_new(level)
            .map_err(|e| anyhow!("invalid log level {:?}: {}", level, e)),
    }
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(level: &str, format: LogFormat) -> Result<()> {
    let filter = build_filter(level)?;
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match format {
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(std::io::stderr().is_terminal())
                    .with_target(true)
                    .compact(),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_current_span(false),
            )
            .try_init(),
    };
    installed.map_err(|e| anyhow!("logging already initialized: {}", e))?;

    tracing::debug!(?format, "logging initialized");
    Ok(())
}
