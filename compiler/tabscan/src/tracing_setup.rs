//! Tracing subscriber setup for the CLI.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Filter directives, e.g. `TABSCAN_LOG=tabscan_core=trace`.
pub const LOG_ENV: &str = "TABSCAN_LOG";

/// When set, logs render as an indented span tree.
pub const LOG_TREE_ENV: &str = "TABSCAN_LOG_TREE";

/// Initialize tracing from the environment.
///
/// Reads [`LOG_ENV`], falling back to `RUST_LOG`. With neither set no
/// subscriber is installed. Logs go to stderr so token output on stdout stays
/// clean. Safe to call multiple times.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let Some(filter) = env_filter() else {
            return;
        };
        let registry = tracing_subscriber::registry().with(filter);
        if std::env::var_os(LOG_TREE_ENV).is_some() {
            registry
                .with(tracing_tree::HierarchicalLayer::new(2).with_targets(true))
                .init();
        } else {
            registry
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    });
}

fn env_filter() -> Option<EnvFilter> {
    if std::env::var_os(LOG_ENV).is_some() {
        Some(EnvFilter::from_env(LOG_ENV))
    } else if std::env::var_os("RUST_LOG").is_some() {
        Some(EnvFilter::from_default_env())
    } else {
        None
    }
}
