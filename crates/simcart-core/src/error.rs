//! # Error Types
//!
//! Domain-specific error types for simcart-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  simcart-core errors (this file)                                        │
//! │  ├── CoreError        - Catalog and configuration failures              │
//! │  └── ValidationError  - Bad catalog entries / shell input               │
//! │                                                                         │
//! │  simcart shell errors (apps/cli)                                        │
//! │  └── CliError         - What the user sees on the terminal              │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CliError → stderr                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Recoverable vs Fatal
//! A malformed catalog ([`CoreError::CatalogParse`]) is bad input and can be
//! reported and retried. A catalog without the bonus product that a
//! promotion hands out ([`CoreError::BonusProductMissing`]) is a broken
//! deployment: pricing cannot be trusted, so no cart is ever built.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product code is not in the catalog.
    #[error("Product(code='{0}') is missing")]
    ProductNotFound(String),

    /// Catalog position (1-based) is out of range.
    #[error("No product at catalog position {position} (catalog has {len} products)")]
    PositionOutOfRange { position: usize, len: usize },

    /// A promotion's bonus product is absent from the catalog.
    ///
    /// ## When This Occurs
    /// - The catalog file was edited and the `1gb` data pack removed
    /// - A test catalog was built without the bonus product
    ///
    /// This is a configuration error, not bad user input.
    #[error("Bonus product '{0}' required by a pricing rule is missing from the catalog")]
    BonusProductMissing(String),

    /// The catalog JSON could not be parsed.
    #[error("Invalid catalog JSON: {0}")]
    CatalogParse(#[from] serde_json::Error),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Returns true for errors that mean the deployment itself is broken.
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, CoreError::BonusProductMissing(_))
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g. a code with spaces, a non-numeric quantity).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g. two catalog entries with the same code).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
