//! Tracing subscriber setup for the server binary.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Build the filter used when `RUST_LOG` is not set.
#[must_use]
pub fn default_directive(level: &str) -> String {
    format!("workout_server={level},tower_http={level}")
}

/// Install the global subscriber. `RUST_LOG` takes precedence over `level`.
///
/// Safe to call more than once; only the first call installs anything.
pub fn init_logging(level: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(level)));

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true));

    let _ = subscriber.try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_directive_covers_server_and_http_layer() {
        assert_eq!(
            default_directive("debug"),
            "workout_server=debug,tower_http=debug"
        );
    }

    #[test]
    fn init_logging_twice_does_not_panic() {
        init_logging("info");
        init_logging("trace");
    }
}
