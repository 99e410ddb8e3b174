//! # Shell Error Type
//!
//! Unified error type for the `simcart` shell.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Shell                              │
//! │                                                                         │
//! │  Startup                                                                │
//! │  ├── ConfigError ─────────────► CliError::Config ──────┐                │
//! │  ├── catalog file unreadable ─► CliError::CatalogRead ─┤                │
//! │  ├── CoreError::CatalogParse ─► CliError::Core ────────┼──► exit 1      │
//! │  └── CoreError::BonusProductMissing ─► CliError::Core ─┘                │
//! │                                                                         │
//! │  Per command                                                            │
//! │  ├── unknown command ─────────► CliError::UnknownCommand ─┐             │
//! │  ├── bad arguments ───────────► CliError::Usage ──────────┼─► "Error:"  │
//! │  └── unknown item id ─────────► CliError::Core ───────────┘   continue  │
//! │                                                                         │
//! │  Terminal I/O failure ────────► CliError::Io ─────────────────► exit 1  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use simcart_core::{CoreError, ValidationError};

use crate::config::ConfigError;

/// Errors surfaced by the shell.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Cannot read catalog {}: {source}", .path.display())]
    CatalogRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Usage: {0}")]
    Usage(String),

    #[error("Unknown command '{0}', use 'help' to show available commands")]
    UnknownCommand(String),

    #[error("Terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Returns true when the session cannot continue.
    ///
    /// Everything a user can cause by typing a bad command is recoverable.
    pub fn is_fatal(&self) -> bool {
        match self {
            CliError::Config(_) | CliError::CatalogRead { .. } | CliError::Io(_) => true,
            CliError::Core(err) => {
                err.is_configuration_error() || matches!(err, CoreError::CatalogParse(_))
            }
            CliError::Usage(_) | CliError::UnknownCommand(_) => false,
        }
    }
}

impl From<ValidationError> for CliError {
    fn from(err: ValidationError) -> Self {
        CliError::Core(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_errors_are_recoverable() {
        assert!(!CliError::Usage("add item_id [quantity]".to_string()).is_fatal());
        assert!(!CliError::UnknownCommand("buy".to_string()).is_fatal());
        assert!(!CliError::Core(CoreError::ProductNotFound("x".to_string())).is_fatal());
        assert!(!CliError::from(ValidationError::MustBePositive {
            field: "quantity".to_string()
        })
        .is_fatal());
    }

    #[test]
    fn test_setup_errors_are_fatal() {
        assert!(CliError::Core(CoreError::BonusProductMissing("1gb".to_string())).is_fatal());
        assert!(CliError::Config(ConfigError::InvalidValue("X".to_string())).is_fatal());

        let parse = catalog_parse_error();
        assert!(parse.is_fatal());
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            CliError::UnknownCommand("buy".to_string()).to_string(),
            "Unknown command 'buy', use 'help' to show available commands"
        );
        assert_eq!(
            CliError::Core(CoreError::ProductNotFound("x".to_string())).to_string(),
            "Product(code='x') is missing"
        );
    }

    /// A catalog parse error produced through the public API.
    fn catalog_parse_error() -> CliError {
        let err = simcart_core::Catalog::from_json("not json").unwrap_err();
        CliError::Core(err)
    }
}
