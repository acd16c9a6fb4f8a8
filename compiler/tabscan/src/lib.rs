//! tabscan command-line driver.
//!
//! Loads one input into a [`CursorBuffer`](tabscan_core::CursorBuffer), runs
//! the C descriptor table over it, and prints one line per token.

pub mod config;
pub mod driver;
pub mod tracing_setup;

pub use config::{Command, Config, ConfigError, InputSource, OutputFormat, USAGE};
pub use driver::{load_input, run_pass, DriverError, PassSummary};
