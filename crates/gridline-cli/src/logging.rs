//! Logging initialization.
//!
//! Uses `tracing` with `tracing-subscriber`, writing to stderr so command
//! output on stdout stays clean. `RUST_LOG` takes precedence; otherwise only
//! warnings are shown, or debug events from gridline with `-v`.
//!
//! ```bash
//! RUST_LOG=gridline=trace gridline export -t table.yaml -r rows.json
//! ```

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Filter directives used when `RUST_LOG` is unset.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "warn,gridline=debug,gridline_cli=debug"
    } else {
        "warn"
    }
}

/// Install the global subscriber.
pub fn init_logging(verbose: bool) {
    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);
    let filter_layer = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filters_parse() {
        for verbose in [false, true] {
            assert!(EnvFilter::try_new(default_filter(verbose)).is_ok());
        }
    }
}
