//! Logging setup and span names.
//!
//! The library itself only emits `tracing` events. Binaries and tests that
//! want to see them call [`init`] once at startup.

use tracing_subscriber::EnvFilter;

use crate::config::GeneralConfig;
use crate::error::{Result, UtilError};

/// Install a global `tracing` subscriber configured from `config`.
///
/// The filter is taken from `config.log_level` only; the process
/// environment is not consulted.
///
/// # Errors
/// Returns `UtilError::Config` if the filter directive is invalid or a
/// global subscriber has already been installed.
pub fn init(config: &GeneralConfig) -> Result<()> {
    let filter = EnvFilter::try_new(&config.log_level).map_err(|e| {
        UtilError::Config(format!("invalid log filter {:?}: {e}", config.log_level))
    })?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let installed = if config.json_logs {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| UtilError::Config(e.to_string()))
}

/// Span names used with `tracing::span!`.
pub mod spans {
    /// One call through a memoized operation.
    pub const MEMO_CALL: &str = "omnos::memo::call";
    /// A timed operation.
    pub const TIMING: &str = "omnos::timing";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_filter() {
        let config = GeneralConfig {
            log_level: "omnos=notalevel".to_string(),
            json_logs: false,
        };
        assert!(matches!(init(&config), Err(UtilError::Config(_))));
    }

    #[test]
    fn second_install_fails() {
        let config = GeneralConfig::default();
        // Another test in this binary may have installed one already.
        let _ = init(&config);
        assert!(matches!(init(&config), Err(UtilError::Config(_))));
    }
}
