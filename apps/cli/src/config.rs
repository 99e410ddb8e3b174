//! Shell configuration.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults, then command-line flags override it.
//!
//! | Variable               | Flag              | Default                |
//! |------------------------|-------------------|------------------------|
//! | `SIMCART_CATALOG_PATH` | `--catalog`, `-c` | `product-catalog.json` |
//! | `SIMCART_PROMPT`       |                   | `> `                   |
//! | `SIMCART_MAX_QUANTITY` |                   | `999`                  |

use std::env;
use std::path::PathBuf;

use simcart_core::MAX_ITEM_QUANTITY;

/// Default catalog file, relative to the working directory.
pub const DEFAULT_CATALOG_PATH: &str = "product-catalog.json";

/// Shell configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Path of the JSON product catalog
    pub catalog_path: PathBuf,

    /// Prompt printed before each command
    pub prompt: String,

    /// Largest quantity accepted by `add` and `remove`
    pub max_quantity: i64,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            prompt: "> ".to_string(),
            max_quantity: MAX_ITEM_QUANTITY,
        }
    }
}

impl CliConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(|key| env::var(key).ok())
    }

    /// Load configuration from any variable source.
    pub fn load_with<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = CliConfig::default();

        let config = CliConfig {
            catalog_path: var("SIMCART_CATALOG_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.catalog_path),

            prompt: var("SIMCART_PROMPT").unwrap_or(defaults.prompt),

            max_quantity: match var("SIMCART_MAX_QUANTITY") {
                Some(raw) => raw
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue("SIMCART_MAX_QUANTITY".to_string()))?,
                None => defaults.max_quantity,
            },
        };

        if config.max_quantity < 1 {
            return Err(ConfigError::InvalidValue("SIMCART_MAX_QUANTITY".to_string()));
        }

        Ok(config)
    }

    /// Applies command-line overrides.
    pub fn with_args(mut self, args: &CliArgs) -> Self {
        if let Some(path) = &args.catalog_path {
            self.catalog_path = path.clone();
        }
        self
    }
}

// =============================================================================
// Command-Line Arguments
// =============================================================================

/// Parsed command-line flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    /// `--catalog <path>`
    pub catalog_path: Option<PathBuf>,

    /// `--help`
    pub help: bool,
}

/// Usage text for `--help`.
pub const USAGE: &str = "\
SimCart - interactive shopping cart

Usage: simcart [OPTIONS]

Options:
  -c, --catalog <PATH>    Product catalog JSON file (default: product-catalog.json)
  -h, --help              Show this help message

Environment:
  SIMCART_CATALOG_PATH    Product catalog JSON file
  SIMCART_PROMPT          Shell prompt (default: \"> \")
  SIMCART_MAX_QUANTITY    Largest quantity per add/remove (default: 999)
  RUST_LOG                Log filter (default: warn,simcart_cli=info)";

impl CliArgs {
    /// Parses flags (without the program name).
    pub fn parse<I, S>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut parsed = CliArgs::default();
        let mut args = args.into_iter().map(Into::<String>::into);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--catalog" | "-c" => {
                    let path = args
                        .next()
                        .ok_or_else(|| ConfigError::MissingRequired("--catalog <PATH>".to_string()))?;
                    parsed.catalog_path = Some(PathBuf::from(path));
                }
                "--help" | "-h" => parsed.help = true,
                other => return Err(ConfigError::UnknownArgument(other.to_string())),
            }
        }

        Ok(parsed)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Unknown argument '{0}', use --help to list options")]
    UnknownArgument(String),
}
