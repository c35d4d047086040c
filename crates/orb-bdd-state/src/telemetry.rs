//! Tracing setup for harness binaries.
//!
//! Log lines go to stderr so that command output on stdout stays
//! machine-readable. `RUST_LOG` overrides the default level.

use tracing::level_filters::LevelFilter;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Build the filter: `RUST_LOG` directives on top of `level`.
fn scenario_filter(level: Level) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy()
}

/// Install the global subscriber.
///
/// JSON output carries the enclosing scenario span on every line. Only the
/// first call in a process takes effect.
pub fn init_tracing(json: bool, level: Level) {
    let (text, structured) = if json {
        let layer = fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .with_writer(std::io::stderr);
        (None, Some(layer))
    } else {
        (Some(fmt::layer().with_writer(std::io::stderr)), None)
    };

    let installed = tracing_subscriber::registry()
        .with(scenario_filter(level))
        .with(text)
        .with(structured)
        .try_init();

    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_ignored() {
        init_tracing(false, Level::DEBUG);
        init_tracing(true, Level::INFO);
    }

    #[test]
    fn test_filter_defaults_to_level() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let filter = scenario_filter(Level::WARN);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
    }
}
