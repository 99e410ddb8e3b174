//! # SimCart Shell
//!
//! Line-oriented front end over `simcart-core`.
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. init_tracing()            RUST_LOG or "warn,simcart_cli=info"       │
//! │  2. CliArgs::parse()          --catalog, --help                         │
//! │  3. CliConfig::load()         SIMCART_* environment variables           │
//! │  4. load_catalog()            JSON file → Catalog                       │
//! │  5. PricingRules::standard()  fails if the bonus product is missing     │
//! │  6. Session::run()            stdin → commands → stdout                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Logs go to stderr so they never interleave with cart output.

pub mod commands;
pub mod config;
pub mod error;
pub mod session;

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use simcart_core::{Catalog, PricingRules};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{CliArgs, CliConfig, USAGE};
use crate::error::CliError;
use crate::session::Session;

/// Default log filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "warn,simcart_cli=info";

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show every command and pricing rule
/// - `RUST_LOG=simcart_core=debug` - Show pricing rules only
/// - Default: warnings, plus session start/end
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .init();
}

/// Reads and parses the catalog file.
pub fn load_catalog(path: &Path) -> Result<Catalog, CliError> {
    let file = File::open(path).map_err(|source| CliError::CatalogRead {
        path: path.to_path_buf(),
        source,
    })?;

    let catalog = Catalog::from_reader(BufReader::new(file))?;
    info!(path = %path.display(), products = catalog.len(), "Catalog loaded");
    Ok(catalog)
}

/// Runs the shell with the given flags (program name excluded) on
/// stdin/stdout.
pub fn run<I, S>(args: I) -> Result<(), CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let args = CliArgs::parse(args)?;
    if args.help {
        println!("{}", USAGE);
        return Ok(());
    }

    let config = CliConfig::load()?.with_args(&args);
    info!(
        catalog = %config.catalog_path.display(),
        max_quantity = config.max_quantity,
        "Configuration loaded"
    );

    let catalog = load_catalog(&config.catalog_path)?;
    let rules = PricingRules::standard(&catalog)?;

    let stdin = io::stdin();
    let mut session = Session::new(catalog, rules, config);
    session.run(stdin.lock(), io::stdout())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_load_catalog_missing_file() {
        let path = PathBuf::from("definitely/not/here/product-catalog.json");
        let err = load_catalog(&path).unwrap_err();

        assert!(matches!(err, CliError::CatalogRead { .. }));
        assert!(err.is_fatal());
        assert!(err
            .to_string()
            .starts_with("Cannot read catalog definitely/not/here/product-catalog.json"));
    }

    #[test]
    fn test_load_bundled_catalog() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../product-catalog.json");
        let catalog = load_catalog(&path).unwrap();

        assert_eq!(catalog.len(), 4);
        assert!(PricingRules::standard(&catalog).is_ok());
    }

    #[test]
    fn test_run_help_and_bad_flags() {
        assert!(run(["--help"]).is_ok());
        assert!(matches!(
            run(["--nope"]),
            Err(CliError::Config(_))
        ));
    }
}
