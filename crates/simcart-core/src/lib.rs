//! # simcart-core: Pure Business Logic for SimCart
//!
//! This crate is the **heart** of SimCart. It contains the shopping cart and
//! the promotional pricing engine as plain in-memory code with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        SimCart Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Shell (apps/cli)                             │   │
//! │  │    catalog ──► add / remove ──► promo ──► cart                  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ simcart-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  catalog  │  │   money   │  │   cart    │  │   rules   │  │   │
//! │  │   │  Catalog  │  │   Money   │  │ Shopping- │  │ Pricing-  │  │   │
//! │  │   │  Product  │  │ Discounts │  │   Cart    │  │   Rule    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO GLOBALS • DETERMINISTIC PRICING                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, CartItem)
//! - [`money`] - Money type with integer arithmetic
//! - [`catalog`] - Product catalog parsed from JSON
//! - [`cart`] - The shopping cart and its pricing pass
//! - [`rules`] - Promotional pricing rules
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use simcart_core::{Catalog, CartItem, PricingRules, ShoppingCart};
//!
//! let catalog = Catalog::from_json(r#"[
//!     {"Code": "ult_small", "Name": "Unlimited 1GB", "Price": 24.90},
//!     {"Code": "1gb", "Name": "1 GB Data-pack", "Price": 9.90}
//! ]"#).unwrap();
//!
//! let mut cart = ShoppingCart::new(PricingRules::standard(&catalog).unwrap());
//! let small = catalog.lookup("ult_small").unwrap();
//! cart.add(CartItem::new(small.clone(), 3));
//!
//! // Buy 3 for the price of 2
//! assert_eq!(cart.total().cents(), 4980);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod rules;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{CartSummary, ShoppingCart};
pub use catalog::Catalog;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use rules::{PricingContext, PricingRule, PricingRules};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity a caller should accept for a single add/remove.
///
/// The cart itself does not enforce this; the shell validates input
/// against it (see [`validation::validate_quantity`]).
pub const MAX_ITEM_QUANTITY: i64 = 999;
