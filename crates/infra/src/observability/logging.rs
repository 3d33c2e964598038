//! Tracing setup and a logging observer

use credwatch_core::BulkLeakCheckObserver;
use credwatch_domain::{
    BulkLeakCheckState, CredWatchError, IsLeaked, LeakCheckCredential, LoggingConfig, Result,
};
use tracing::{debug, info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global `tracing` subscriber
///
/// `RUST_LOG` takes precedence over the configured level. Calling this again
/// after a subscriber is installed leaves the existing one in place.
///
/// # Errors
/// Returns `CredWatchError::Config` when the configured level is not a valid
/// filter directive.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level).map_err(|e| {
            CredWatchError::Config(format!("Invalid log level '{}': {}", config.level, e))
        })?,
    };

    let installed = if config.json {
        let subscriber = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_current_span(true).with_target(true));
        tracing::subscriber::set_global_default(subscriber).is_ok()
    } else {
        let subscriber =
            tracing_subscriber::registry().with(filter).with(fmt::layer().with_target(true));
        tracing::subscriber::set_global_default(subscriber).is_ok()
    };

    if !installed {
        debug!("Tracing subscriber already installed");
    }
    Ok(())
}

/// Logs every state change and result
///
/// Error states log at `warn`, leaks at `info`, everything else at `debug`.
/// Passwords never reach the log.
#[derive(Debug, Default)]
pub struct LoggingObserver;

impl BulkLeakCheckObserver for LoggingObserver {
    fn on_state_changed(&self, state: BulkLeakCheckState, pending_checks: usize) {
        if state.is_error() {
            warn!(%state, pending_checks, "Bulk leak check state changed");
        } else {
            debug!(%state, pending_checks, "Bulk leak check state changed");
        }
    }

    fn on_result_found(&self, credential: &LeakCheckCredential, is_leaked: IsLeaked) {
        if is_leaked.is_leaked() {
            info!(
                credential = %credential.id(),
                saved_entries = credential.saved_credentials().len(),
                "Leaked credential found"
            );
        } else {
            debug!(credential = %credential.id(), "Credential not leaked");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_level_is_config_error() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let config = LoggingConfig { level: "credwatch=loudest".into(), json: false };
        assert!(matches!(init_tracing(&config), Err(CredWatchError::Config(_))));
    }

    #[test]
    fn test_repeated_init_is_tolerated() {
        let config = LoggingConfig::default();
        assert!(init_tracing(&config).is_ok());
        assert!(init_tracing(&config).is_ok());
        assert!(init_tracing(&LoggingConfig { json: true, ..config }).is_ok());
    }

    #[test]
    fn test_logging_observer_accepts_all_states() {
        let observer = LoggingObserver;
        for state in BulkLeakCheckState::ALL {
            observer.on_state_changed(state, 1);
        }
        observer.on_result_found(&LeakCheckCredential::new("u", "p"), IsLeaked(true));
    }
}
