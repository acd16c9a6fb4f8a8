//! Command-line configuration.
//!
//! Arguments are parsed by hand into a [`Config`]. Logging is configured
//! from the environment instead (see [`crate::tracing_setup`]).

use std::path::PathBuf;

use tabscan_core::BufferConfig;

pub const USAGE: &str = "\
Usage: tabscan [OPTIONS] [FILE]

Tokenize FILE (or standard input when FILE is absent or `-`) and print one
line per token.

Options:
  --format=<fmt>   Output format: plain (default), tsv
  --offsets        Prefix each token with its byte offset
  -q, --quiet      Do not print the trailing `Ended.` line
  --delta=<n>      Buffer growth increment in bytes (values below 2 mean 32)
  -h, --help       Show this help

Environment:
  TABSCAN_LOG       Log filter, e.g. `tabscan_core=trace` (falls back to RUST_LOG)
  TABSCAN_LOG_TREE  Render logs as an indented span tree
";

/// Where the input bytes come from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum InputSource {
    #[default]
    Stdin,
    Path(PathBuf),
}

/// How each token is printed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// `token: <label> <lexeme>`, lexeme bytes written as-is.
    #[default]
    Plain,
    /// `<label>\t<lexeme>` with tab, newline, carriage return and backslash
    /// escaped so every token stays on one line.
    Tsv,
}

/// Settings for one run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    pub input: InputSource,
    pub format: OutputFormat,
    pub offsets: bool,
    pub quiet: bool,
    pub buffer: BufferConfig,
}

/// What the command line asked for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Scan(Config),
    Help,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown option '{0}'")]
    UnknownOption(String),
    #[error("unknown output format '{0}' (expected plain or tsv)")]
    InvalidFormat(String),
    #[error("invalid growth delta '{0}' (expected a non-negative integer)")]
    InvalidDelta(String),
    #[error("unexpected argument '{0}': only one input file is accepted")]
    ExtraArgument(String),
}

impl Config {
    /// Parse arguments, excluding the program name.
    ///
    /// `--help` wins over any other valid argument on the line.
    pub fn from_args<I, S>(args: I) -> Result<Command, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut config = Config::default();
        let mut input: Option<InputSource> = None;
        let mut help = false;

        for arg in args {
            let arg: String = arg.into();
            if arg == "-h" || arg == "--help" {
                help = true;
            } else if arg == "--offsets" {
                config.offsets = true;
            } else if arg == "--quiet" || arg == "-q" {
                config.quiet = true;
            } else if let Some(format) = arg.strip_prefix("--format=") {
                config.format = match format {
                    "plain" => OutputFormat::Plain,
                    "tsv" => OutputFormat::Tsv,
                    _ => return Err(ConfigError::InvalidFormat(format.to_string())),
                };
            } else if let Some(delta) = arg.strip_prefix("--delta=") {
                let delta = delta
                    .parse::<usize>()
                    .map_err(|_| ConfigError::InvalidDelta(delta.to_string()))?;
                config.buffer = BufferConfig::new(delta);
            } else if arg == "-" {
                if input.is_some() {
                    return Err(ConfigError::ExtraArgument(arg));
                }
                input = Some(InputSource::Stdin);
            } else if arg.starts_with('-') {
                return Err(ConfigError::UnknownOption(arg));
            } else {
                if input.is_some() {
                    return Err(ConfigError::ExtraArgument(arg));
                }
                input = Some(InputSource::Path(PathBuf::from(arg)));
            }
        }

        if help {
            return Ok(Command::Help);
        }
        config.input = input.unwrap_or_default();
        Ok(Command::Scan(config))
    }
}
