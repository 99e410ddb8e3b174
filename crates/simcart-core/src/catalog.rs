//! # Product Catalog
//!
//! The flat product lookup the cart and the pricing rules draw from.
//!
//! ## JSON Format
//! A bare array of objects, no wrapping key, PascalCase field names:
//! ```json
//! [
//!   {"Code": "ult_small", "Name": "Unlimited 1GB", "Price": 24.90},
//!   {"Code": "1gb", "Name": "1 GB Data-pack", "Price": 9.90}
//! ]
//! ```
//!
//! ## Load Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  JSON text ──► Vec<CatalogEntry> ──► validate ──► Product ──► Catalog   │
//! │                   (serde_json)       code/name     price in   lookup +  │
//! │                                      price         cents      position  │
//! │                                                                         │
//! │  Malformed JSON      → CoreError::CatalogParse                          │
//! │  Bad entry           → CoreError::Validation                            │
//! │  Duplicate code      → CoreError::Validation(Duplicate)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Reading the file is the caller's job; this module only sees text or a
//! reader.

use std::collections::HashMap;
use std::fmt;
use std::io::Read;

use serde::Deserialize;
use tracing::debug;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::Product;
use crate::validation::{validate_price_cents, validate_product_code, validate_product_name};

// =============================================================================
// Wire Format
// =============================================================================

/// One catalog entry exactly as it appears in the JSON file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CatalogEntry {
    code: String,
    name: String,
    price: f64,
}

impl TryFrom<CatalogEntry> for Product {
    type Error = CoreError;

    fn try_from(entry: CatalogEntry) -> CoreResult<Self> {
        validate_product_code(&entry.code)?;
        validate_product_name(&entry.name)?;

        let price = Money::from_decimal(entry.price).ok_or_else(|| {
            ValidationError::InvalidFormat {
                field: "price".to_string(),
                reason: format!("{} is not a representable amount", entry.price),
            }
        })?;
        validate_price_cents(price.cents())?;

        Ok(Product::new(entry.code.trim(), entry.name.trim(), price))
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// An ordered, immutable list of products with lookup by code.
///
/// Order is the file order; the shell's item ids are 1-based positions in it.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    by_code: HashMap<String, usize>,
}

impl Catalog {
    /// Builds a catalog from products, rejecting duplicate codes.
    pub fn new(products: Vec<Product>) -> CoreResult<Self> {
        let mut by_code = HashMap::with_capacity(products.len());
        for (index, product) in products.iter().enumerate() {
            if by_code.insert(product.code.clone(), index).is_some() {
                return Err(ValidationError::Duplicate {
                    field: "code".to_string(),
                    value: product.code.clone(),
                }
                .into());
            }
        }

        debug!(products = products.len(), "Catalog built");
        Ok(Catalog { products, by_code })
    }

    /// Parses a catalog from JSON text.
    ///
    /// ## Example
    /// ```rust
    /// use simcart_core::Catalog;
    ///
    /// let catalog = Catalog::from_json(
    ///     r#"[{"Code": "1gb", "Name": "1 GB Data-pack", "Price": 9.90}]"#,
    /// ).unwrap();
    /// assert_eq!(catalog.lookup("1gb").unwrap().price.cents(), 990);
    /// ```
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(json)?;
        Self::from_entries(entries)
    }

    /// Parses a catalog from any reader producing JSON.
    pub fn from_reader<R: Read>(reader: R) -> CoreResult<Self> {
        let entries: Vec<CatalogEntry> = serde_json::from_reader(reader)?;
        Self::from_entries(entries)
    }

    fn from_entries(entries: Vec<CatalogEntry>) -> CoreResult<Self> {
        let products = entries
            .into_iter()
            .map(Product::try_from)
            .collect::<CoreResult<Vec<_>>>()?;
        Self::new(products)
    }

    /// Looks up a product by code.
    pub fn lookup(&self, code: &str) -> CoreResult<&Product> {
        self.by_code
            .get(code)
            .map(|&index| &self.products[index])
            .ok_or_else(|| CoreError::ProductNotFound(code.to_string()))
    }

    /// Returns the product at a 1-based catalog position.
    pub fn get(&self, position: usize) -> CoreResult<&Product> {
        position
            .checked_sub(1)
            .and_then(|index| self.products.get(index))
            .ok_or(CoreError::PositionOutOfRange {
                position,
                len: self.products.len(),
            })
    }

    /// All products in file order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Checks if the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Renders the catalog as the table the shell's `catalog` command prints.
///
/// ```text
/// ID  Product Name            Price
/// 1   Unlimited 1GB           $24.90
/// ```
impl fmt::Display for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<4}{:<24}{}", "ID", "Product Name", "Price")?;
        for (index, product) in self.products.iter().enumerate() {
            writeln!(f, "{:<4}{:<24}{}", index + 1, product.name, product.price)?;
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
