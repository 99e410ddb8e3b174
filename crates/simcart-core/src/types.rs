//! # Domain Types
//!
//! Core domain types used throughout SimCart.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐          ┌─────────────────────┐                   │
//! │  │    Product      │          │      CartItem       │                   │
//! │  │  ─────────────  │  owned   │  ─────────────────  │                   │
//! │  │  code (unique)  │◄─────────│  quantity           │                   │
//! │  │  name           │          │  subtotal (derived) │                   │
//! │  │  price (Money)  │          │  product            │                   │
//! │  └─────────────────┘          └─────────────────────┘                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A `CartItem` carries its own copy of the product, so the cart never needs
//! to reach back into the catalog to price a line.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product available for sale. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Unique product code, e.g. `ult_small`.
    pub code: String,

    /// Display name, e.g. `Unlimited 1GB`.
    pub name: String,

    /// Unit price.
    pub price: Money,
}

impl Product {
    /// Creates a product.
    pub fn new(code: impl Into<String>, name: impl Into<String>, price: Money) -> Self {
        Product {
            code: code.into(),
            name: name.into(),
            price,
        }
    }
}

// =============================================================================
// Cart Item
// =============================================================================

/// A product line in the cart.
///
/// ## Subtotal
/// `subtotal` is derived: the cart overwrites it with `quantity × price` at
/// the start of every pricing pass, then pricing rules adjust it. Callers
/// constructing items to add or remove leave it at zero. Freebies emitted by
/// rules keep a zero subtotal for good.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartItem {
    /// Number of units.
    pub quantity: i64,

    /// Price contribution after rule adjustments.
    pub subtotal: Money,

    /// The product on this line.
    pub product: Product,
}

impl CartItem {
    /// Creates an item with a zero subtotal.
    pub fn new(product: Product, quantity: i64) -> Self {
        CartItem {
            quantity,
            subtotal: Money::zero(),
            product,
        }
    }

    /// Product code of this line.
    #[inline]
    pub fn code(&self) -> &str {
        &self.product.code
    }

    /// Unit price of the product on this line.
    #[inline]
    pub fn unit_price(&self) -> Money {
        self.product.price
    }

    /// Undiscounted line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.product.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
