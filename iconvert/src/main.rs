//! iConvert session
//!
//! Drives one converter form over a line-based protocol: one JSON request per
//! line on stdin, one JSON response per line on stdout. Logs go to stderr.
//!
//! Methods:
//! - ping, categories, convert, parse: stateless queries
//! - state, select_category, set_input, set_output,
//!   set_input_unit, set_output_unit: form edits
//!
//! Environment:
//! - RUST_LOG: log filter (default "info")
//! - ICONVERT_CATEGORY: initial category (default "Distance")

mod session;

use iconvert_units::{Category, ConversionError};
use session::{Response, Session};
use std::env;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Session configuration read from the environment
#[derive(Debug)]
struct Config {
    category: Category,
}

impl Config {
    fn from_env() -> Result<Self, ConversionError> {
        Self::from_var(env::var("ICONVERT_CATEGORY"))
    }

    /// Build from the raw `ICONVERT_CATEGORY` lookup; only an unset variable
    /// falls back to the default category
    fn from_var(var: Result<String, env::VarError>) -> Result<Self, ConversionError> {
        let category = match var {
            Ok(name) => Category::from_name(&name)?,
            Err(env::VarError::NotPresent) => Category::default(),
            Err(env::VarError::NotUnicode(raw)) => {
                return Err(ConversionError::UnknownCategory(raw.to_string_lossy().into_owned()));
            }
        };
        Ok(Config { category })
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    init_logging();

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!(version = SERVER_VERSION, category = %config.category, "iconvert session started");
    let mut session = Session::new(config.category);

    let stdin = io::stdin();
    let mut reader = io::BufReader::new(stdin.lock());

    loop {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) => {
                info!("end of input");
                break;
            }
            Ok(_) => {
                let Some(response) = session.handle_line(&line) else {
                    continue;
                };
                if let Err(e) = write_response(&response) {
                    error!("error writing response: {}", e);
                    return ExitCode::FAILURE;
                }
            }
            Err(e) => {
                error!("error reading input: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}

fn write_response(response: &Response) -> io::Result<()> {
    let json = serde_json::to_string(response)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", json)?;
    stdout.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    #[test]
    fn test_config_valid_category() {
        let config = Config::from_var(Ok("Mass".to_string())).unwrap();
        assert_eq!(config.category, Category::Mass);
    }

    #[test]
    fn test_config_unset_uses_default() {
        let config = Config::from_var(Err(env::VarError::NotPresent)).unwrap();
        assert_eq!(config.category, Category::Distance);
    }

    #[test]
    fn test_config_unknown_category() {
        let err = Config::from_var(Ok("Volume".to_string())).unwrap_err();
        assert_eq!(err, ConversionError::UnknownCategory("Volume".to_string()));
    }

    #[test]
    fn test_config_non_unicode_is_rejected() {
        let err = Config::from_var(Err(env::VarError::NotUnicode(OsString::from("Dist\u{fffd}")))).unwrap_err();
        assert!(matches!(err, ConversionError::UnknownCategory(_)));
    }
}
