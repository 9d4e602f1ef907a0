#![forbid(unsafe_code)]

//! Subscriber setup for binaries embedding the engine.
//!
//! The engine emits events through `tracing` directly. The `tracing-json`
//! feature adds [`init_subscriber`], which installs a JSON formatter filtered
//! by the `TESSEL_LOG` environment variable.

/// Environment variable holding the `EnvFilter` directive for `init_subscriber`.
pub const LOG_ENV: &str = "TESSEL_LOG";

/// Install a global JSON subscriber.
///
/// The filter comes from `TESSEL_LOG` and falls back to `info`. Returns
/// `false` when a global subscriber was already set.
#[cfg(feature = "tracing-json")]
pub fn init_subscriber() -> bool {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    #[test]
    fn log_env_name() {
        assert_eq!(super::LOG_ENV, "TESSEL_LOG");
    }

    #[cfg(feature = "tracing-json")]
    #[test]
    fn second_install_reports_false() {
        let _ = super::init_subscriber();
        assert!(!super::init_subscriber());
    }
}
