//! # Pricing Rules
//!
//! Promotional rules the cart runs on every pricing pass.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Pricing Pass                                     │
//! │                                                                         │
//! │  subtotal = qty × price  (every added item)                             │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  1. Buy3For2             ult_small: every 3rd unit free                 │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  2. BuyOneGetOneFree     ult_medium: one free 1gb per unit ──► freebies │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  3. BulkDiscount         ult_large, qty > 3: $39.90 each                │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  4. OverallDiscountPromo "I<3AMAYSIM": 10% off every subtotal so far    │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  Σ subtotals = total     (freebies never counted)                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Order is part of the pricing contract: the overall discount multiplies
//! whatever the item rules left behind, so moving it earlier changes totals.
//!
//! ## What a Rule May Touch
//! Rules see the cart only through a [`PricingContext`], which allows
//! reading items and promo codes and replacing subtotals. Quantities and the
//! set of lines are out of reach.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use tracing::debug;

use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CartItem, Product};

// =============================================================================
// Promotion Constants
// =============================================================================

/// Product that triggers the buy-3-pay-2 deal.
pub const BUY_3_FOR_2_CODE: &str = "ult_small";

/// Product that earns a free bonus product per unit.
pub const BUY_ONE_GET_ONE_CODE: &str = "ult_medium";

/// The bonus product handed out by the buy-one-get-one deal.
pub const BONUS_PRODUCT_CODE: &str = "1gb";

/// Product with a bulk price.
pub const BULK_DISCOUNT_CODE: &str = "ult_large";

/// Bulk price applies when quantity is strictly above this.
pub const BULK_DISCOUNT_THRESHOLD: i64 = 3;

/// Unit price once the bulk threshold is passed.
pub const BULK_DISCOUNT_UNIT_PRICE: Money = Money::from_major_minor(39, 90);

/// Promo code unlocking the overall discount.
pub const OVERALL_PROMO_CODE: &str = "I<3AMAYSIM";

/// Overall discount in basis points (10%).
pub const OVERALL_DISCOUNT_BPS: u32 = 1000;

// =============================================================================
// Pricing Context
// =============================================================================

/// What a rule sees of the cart during one pricing pass.
///
/// Borrowed from the cart for a single [`PricingRule::apply`] call; the
/// lifetime keeps a rule from holding on to it.
#[derive(Debug)]
pub struct PricingContext<'a> {
    items: &'a mut BTreeMap<String, CartItem>,
    promo_codes: &'a BTreeSet<String>,
}

impl<'a> PricingContext<'a> {
    /// Wraps a working set of items and the cart's promo codes.
    pub fn new(
        items: &'a mut BTreeMap<String, CartItem>,
        promo_codes: &'a BTreeSet<String>,
    ) -> Self {
        PricingContext { items, promo_codes }
    }

    /// Returns the added item with the given code, if any.
    pub fn item(&self, code: &str) -> Option<&CartItem> {
        self.items.get(code)
    }

    /// Iterates added items in code order.
    pub fn items(&self) -> impl Iterator<Item = &CartItem> {
        self.items.values()
    }

    /// Checks if a promo code has been applied to the cart.
    pub fn uses_promo_code(&self, code: &str) -> bool {
        self.promo_codes.contains(code)
    }

    /// Replaces the subtotal of one item. Returns false if the code is absent.
    pub fn set_subtotal(&mut self, code: &str, subtotal: Money) -> bool {
        match self.items.get_mut(code) {
            Some(item) => {
                item.subtotal = subtotal;
                true
            }
            None => false,
        }
    }

    /// Replaces every item's subtotal with `f(item)`.
    pub fn adjust_subtotals<F>(&mut self, mut f: F)
    where
        F: FnMut(&CartItem) -> Money,
    {
        for item in self.items.values_mut() {
            item.subtotal = f(item);
        }
    }
}

// =============================================================================
// Pricing Rule
// =============================================================================

/// A promotional pricing rule.
///
/// ## Contract
/// - May read items and promo codes through the context
/// - May replace subtotals of added items
/// - Returns freebies: new items priced at zero that show up in
///   [`ShoppingCart::items`](crate::ShoppingCart::items) but never in the total
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PricingRule {
    /// Pay for 2 `ult_small` out of every 3.
    Buy3For2,

    /// One free `bonus` per `ult_medium` bought. The freebie carries the
    /// trigger's quantity as is, zero and negative included.
    ///
    /// The bonus product is resolved from the catalog when the rule is
    /// built, so applying the rule never fails.
    BuyOneGetOneFree { bonus: Product },

    /// `ult_large` drops to $39.90 each above 3 units.
    BulkDiscount,

    /// 10% off every subtotal when `I<3AMAYSIM` is applied.
    OverallDiscountPromo,
}

impl PricingRule {
    /// Builds the buy-one-get-one rule with its bonus product from the catalog.
    ///
    /// ## Errors
    /// [`CoreError::BonusProductMissing`] when the catalog has no `1gb`.
    pub fn buy_one_get_one_free(catalog: &Catalog) -> CoreResult<Self> {
        let bonus = catalog
            .lookup(BONUS_PRODUCT_CODE)
            .map_err(|_| CoreError::BonusProductMissing(BONUS_PRODUCT_CODE.to_string()))?;

        Ok(PricingRule::BuyOneGetOneFree {
            bonus: bonus.clone(),
        })
    }

    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            PricingRule::Buy3For2 => "buy_3_for_2",
            PricingRule::BuyOneGetOneFree { .. } => "buy_one_get_one_free",
            PricingRule::BulkDiscount => "bulk_discount",
            PricingRule::OverallDiscountPromo => "overall_discount_promo",
        }
    }

    /// Applies the rule to one pricing pass and returns any freebies.
    pub fn apply(&self, ctx: &mut PricingContext<'_>) -> Vec<CartItem> {
        match self {
            PricingRule::Buy3For2 => {
                if let Some(item) = ctx.item(BUY_3_FOR_2_CODE) {
                    let free_units = item.quantity / 3;
                    if free_units > 0 {
                        let discounted = item.subtotal - item.unit_price() * free_units;
                        debug!(rule = self.name(), free_units, "Rule applied");
                        ctx.set_subtotal(BUY_3_FOR_2_CODE, discounted);
                    }
                }
                Vec::new()
            }

            PricingRule::BuyOneGetOneFree { bonus } => match ctx.item(BUY_ONE_GET_ONE_CODE) {
                Some(item) => {
                    debug!(rule = self.name(), bonus = %bonus.code, quantity = item.quantity, "Rule applied");
                    vec![CartItem::new(bonus.clone(), item.quantity)]
                }
                _ => Vec::new(),
            },

            PricingRule::BulkDiscount => {
                if let Some(item) = ctx.item(BULK_DISCOUNT_CODE) {
                    if item.quantity > BULK_DISCOUNT_THRESHOLD {
                        let bulk = BULK_DISCOUNT_UNIT_PRICE.multiply_quantity(item.quantity);
                        debug!(rule = self.name(), quantity = item.quantity, "Rule applied");
                        ctx.set_subtotal(BULK_DISCOUNT_CODE, bulk);
                    }
                }
                Vec::new()
            }

            PricingRule::OverallDiscountPromo => {
                if ctx.uses_promo_code(OVERALL_PROMO_CODE) {
                    debug!(rule = self.name(), "Rule applied");
                    ctx.adjust_subtotals(|item| {
                        item.subtotal.apply_percentage_discount(OVERALL_DISCOUNT_BPS)
                    });
                }
                Vec::new()
            }
        }
    }
}

impl fmt::Display for PricingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Rule Set
// =============================================================================

/// An ordered list of pricing rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PricingRules(Vec<PricingRule>);

impl PricingRules {
    /// The production rule set, in its required order.
    ///
    /// ## Errors
    /// [`CoreError::BonusProductMissing`] if the catalog cannot supply the
    /// buy-one-get-one bonus product. Treat this as fatal.
    pub fn standard(catalog: &Catalog) -> CoreResult<Self> {
        Ok(PricingRules(vec![
            PricingRule::Buy3For2,
            PricingRule::buy_one_get_one_free(catalog)?,
            PricingRule::BulkDiscount,
            PricingRule::OverallDiscountPromo,
        ]))
    }

    /// A rule set applied in exactly the given order.
    pub fn from_rules(rules: Vec<PricingRule>) -> Self {
        PricingRules(rules)
    }

    /// No promotions: totals are plain `qty × price` sums.
    pub fn none() -> Self {
        PricingRules(Vec::new())
    }

    /// Iterates rules in application order.
    pub fn iter(&self) -> std::slice::Iter<'_, PricingRule> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a PricingRules {
    type Item = &'a PricingRule;
    type IntoIter = std::slice::Iter<'a, PricingRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
