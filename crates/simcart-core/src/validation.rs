//! # Validation Module
//!
//! Input validation utilities for SimCart.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Catalog load                                                  │
//! │  ├── JSON shape (serde)                                                 │
//! │  └── THIS MODULE: code / name / price checks                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Shell input                                                   │
//! │  ├── THIS MODULE: item ids, quantities, promo codes                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: ShoppingCart                                                  │
//! │  └── No validation: quantities are taken as given                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use simcart_core::validation::{validate_product_code, validate_quantity};
//!
//! validate_product_code("ult_small").unwrap();
//! validate_quantity(5, 999).unwrap();
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted product or promo code.
const MAX_CODE_LEN: usize = 50;

/// Longest accepted product name.
const MAX_NAME_LEN: usize = 200;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product code.
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
/// - Only alphanumeric characters, hyphens and underscores
///
/// ## Example
/// ```rust
/// use simcart_core::validation::validate_product_code;
///
/// assert!(validate_product_code("ult_small").is_ok());
/// assert!(validate_product_code("1gb").is_ok());
/// assert!(validate_product_code("").is_err());
/// ```
pub fn validate_product_code(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "code".to_string(),
        });
    }

    if code.len() > MAX_CODE_LEN {
        return Err(ValidationError::TooLong {
            field: "code".to_string(),
            max: MAX_CODE_LEN,
        });
    }

    if !code
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "code".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a promo code typed by the user.
///
/// Promo codes are opaque tokens (`I<3AMAYSIM` contains `<`), so only
/// emptiness, length and embedded whitespace are checked.
pub fn validate_promo_code(code: &str) -> ValidationResult<String> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "promo code".to_string(),
        });
    }

    if code.len() > MAX_CODE_LEN {
        return Err(ValidationError::TooLong {
            field: "promo code".to_string(),
            max: MAX_CODE_LEN,
        });
    }

    if code.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidFormat {
            field: "promo code".to_string(),
            reason: "must not contain spaces".to_string(),
        });
    }

    Ok(code.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value.
///
/// The cart accepts any quantity; this is the shell's policy.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed `max`
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  > add 1 5                                                              │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_quantity(5, 999) ← THIS FUNCTION                              │
/// │       │                                                                 │
/// │       ├── qty <= 0?  → "quantity must be positive"                      │
/// │       ├── qty > max? → "quantity must be between 1 and 999"             │
/// │       └── OK → ShoppingCart::add                                        │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_quantity(qty: i64, max: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > max {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max,
        });
    }

    Ok(())
}

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Parses an integer argument typed in the shell.
pub fn parse_integer(field: &str, raw: &str) -> ValidationResult<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: format!("'{}' is not a whole number", raw.trim()),
        })
}

// =============================================================================
// Unit Tests
// =============================================================================
