//! # Shopping Cart
//!
//! Holds what the customer added and prices it through the pricing rules.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Shell Command        Cart Method               State Change            │
//! │  ─────────────        ───────────               ────────────            │
//! │                                                                         │
//! │  add 1 3 ────────────► add(item) ─────────────► qty += 3                │
//! │                                                                         │
//! │  remove 1 2 ─────────► remove(&item) ─────────► qty -= 2 (< 1: drop)    │
//! │                                                                         │
//! │  promo CODE ─────────► add_promo_code(code) ──► codes ∪ {CODE}          │
//! │                                                                         │
//! │  cart ───────────────► summary() ─────────────► (read only)             │
//! │                        ├── total()                                      │
//! │                        └── items()                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Pricing Is Recomputed, Never Stored
//! `total()` and `items()` take `&self`. Each call copies the added items,
//! resets subtotals to `qty × price`, runs the rules over the copy and reads
//! the result. The added-items store only ever changes through `add`,
//! `remove` and `clear`.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::money::Money;
use crate::rules::{PricingContext, PricingRules};
use crate::types::CartItem;

// =============================================================================
// Shopping Cart
// =============================================================================

/// A single customer's shopping cart.
///
/// ## Invariants
/// - Items are unique by product code (adding the same code accumulates)
/// - `remove` never leaves an item with quantity below 1
/// - Rules always run in the order of the [`PricingRules`] given at creation
///
/// One cart per session; it is a plain owned value with no interior
/// locking.
#[derive(Debug, Clone)]
pub struct ShoppingCart {
    rules: PricingRules,
    added: BTreeMap<String, CartItem>,
    promo_codes: BTreeSet<String>,
    created_at: DateTime<Utc>,
}

/// Result of one pricing pass.
struct Pricing {
    items: BTreeMap<String, CartItem>,
    freebies: Vec<CartItem>,
}

impl Pricing {
    fn total(&self) -> Money {
        self.items.values().map(|item| item.subtotal).sum()
    }

    /// Priced items with freebies merged in, in code order.
    fn into_items(self) -> Vec<CartItem> {
        let mut merged = self.items;
        for freebie in self.freebies {
            merged
                .entry(freebie.product.code.clone())
                .and_modify(|item| item.quantity = item.quantity.saturating_add(freebie.quantity))
                .or_insert(freebie);
        }
        merged.into_values().collect()
    }
}

impl ShoppingCart {
    /// Creates an empty cart priced by `rules`.
    pub fn new(rules: PricingRules) -> Self {
        ShoppingCart {
            rules,
            added: BTreeMap::new(),
            promo_codes: BTreeSet::new(),
            created_at: Utc::now(),
        }
    }

    /// Adds an item, or increases the quantity if the code is already present.
    ///
    /// Quantities are not validated; zero and negative values pass through.
    pub fn add(&mut self, item: CartItem) {
        debug!(code = %item.code(), quantity = item.quantity, "Adding to cart");

        match self.added.get_mut(item.code()) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(item.quantity),
            None => {
                self.added.insert(item.product.code.clone(), item);
            }
        }
    }

    /// Removes `item.quantity` units of the item's product.
    ///
    /// ## Behavior
    /// - Code absent: no-op
    /// - Remaining quantity below 1: the line is dropped
    /// - Otherwise: quantity becomes existing − requested
    pub fn remove(&mut self, item: &CartItem) {
        let Some(existing) = self.added.get_mut(item.code()) else {
            debug!(code = %item.code(), "Remove ignored, not in cart");
            return;
        };

        let remaining = existing.quantity.saturating_sub(item.quantity);
        if remaining < 1 {
            self.added.remove(item.code());
            debug!(code = %item.code(), "Removed from cart");
        } else {
            existing.quantity = remaining;
            debug!(code = %item.code(), remaining, "Reduced quantity");
        }
    }

    /// Applies a promo code. Applying the same code twice has no effect.
    ///
    /// Codes no rule recognises are kept but do nothing.
    pub fn add_promo_code(&mut self, code: impl Into<String>) {
        let code = code.into();
        debug!(code = %code, "Promo code applied");
        self.promo_codes.insert(code);
    }

    /// Checks if a promo code has been applied.
    pub fn uses_promo_code(&self, code: &str) -> bool {
        self.promo_codes.contains(code)
    }

    /// All applied promo codes, sorted.
    pub fn promo_codes_applied(&self) -> Vec<String> {
        self.promo_codes.iter().cloned().collect()
    }

    /// Total price after all pricing rules.
    ///
    /// Freebies handed out by rules are never part of the total.
    pub fn total(&self) -> Money {
        self.price().total()
    }

    /// Every item the customer leaves with: the added items, priced, plus
    /// freebies. A freebie whose code matches an added item increases that
    /// item's quantity instead of adding a line.
    pub fn items(&self) -> Vec<CartItem> {
        self.price().into_items()
    }

    /// The items exactly as added, keyed by product code.
    ///
    /// Pricing never writes back here, so every subtotal is zero. Use
    /// [`summary`](Self::summary)`.added` for priced lines.
    pub fn items_added(&self) -> &BTreeMap<String, CartItem> {
        &self.added
    }

    /// Prices the cart once and returns everything the shell displays.
    pub fn summary(&self) -> CartSummary {
        let pricing = self.price();
        let total = pricing.total();
        let added: Vec<CartItem> = pricing.items.values().cloned().collect();

        CartSummary {
            item_count: added.len(),
            total_quantity: added
                .iter()
                .fold(0, |sum: i64, item| sum.saturating_add(item.quantity)),
            promo_codes: self.promo_codes_applied(),
            added,
            items: pricing.into_items(),
            total,
            created_at: self.created_at,
        }
    }

    /// Checks if nothing has been added.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty()
    }

    /// Empties the cart and forgets promo codes. Rules are kept.
    pub fn clear(&mut self) {
        self.added.clear();
        self.promo_codes.clear();
        self.created_at = Utc::now();
    }

    /// When the cart was created or last cleared.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// The rules this cart prices with, in application order.
    pub fn rules(&self) -> &PricingRules {
        &self.rules
    }

    /// Runs one pricing pass over a copy of the added items.
    fn price(&self) -> Pricing {
        let mut items = self.added.clone();
        for item in items.values_mut() {
            item.subtotal = item.line_total();
        }

        let mut freebies = Vec::new();
        let mut ctx = PricingContext::new(&mut items, &self.promo_codes);
        for rule in &self.rules {
            freebies.extend(rule.apply(&mut ctx));
        }

        Pricing { items, freebies }
    }
}

// =============================================================================
// Cart Summary
// =============================================================================

/// A priced snapshot of the cart.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartSummary {
    /// Number of distinct added products.
    pub item_count: usize,

    /// Sum of added quantities (freebies excluded).
    pub total_quantity: i64,

    /// Applied promo codes, sorted.
    pub promo_codes: Vec<String>,

    /// Added items with their final subtotals.
    pub added: Vec<CartItem>,

    /// Added items plus freebies.
    pub items: Vec<CartItem>,

    /// Total price.
    pub total: Money,

    /// When the cart was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::rules::PricingRule;
    use crate::types::Product;

    const PRODUCTS: &str = r#"[
      {"Code": "ult_small", "Name": "Unlimited 1GB", "Price": 24.90},
      {"Code": "ult_medium", "Name": "Unlimited 2GB", "Price": 29.90},
      {"Code": "ult_large", "Name": "Unlimited 5GB", "Price": 44.90},
      {"Code": "1gb", "Name": "1 GB Data-pack", "Price": 9.90}
    ]"#;

    fn catalog() -> Catalog {
        Catalog::from_json(PRODUCTS).unwrap()
    }

    fn setup() -> (Catalog, ShoppingCart) {
        let catalog = catalog();
        let cart = ShoppingCart::new(PricingRules::standard(&catalog).unwrap());
        (catalog, cart)
    }

    fn item(catalog: &Catalog, code: &str, quantity: i64) -> CartItem {
        CartItem::new(catalog.lookup(code).unwrap().clone(), quantity)
    }

    fn find<'a>(items: &'a [CartItem], code: &str) -> Option<&'a CartItem> {
        items.iter().find(|item| item.code() == code)
    }

    // -------------------------------------------------------------------------
    // add / remove
    // -------------------------------------------------------------------------

    #[test]
    fn test_add_inserts_item() {
        let (catalog, mut cart) = setup();
        let input = item(&catalog, "ult_small", 1);

        cart.add(input.clone());

        assert_eq!(cart.items_added().get("ult_small"), Some(&input));
    }

    #[test]
    fn test_add_accumulates_quantity() {
        let (catalog, mut cart) = setup();

        cart.add(item(&catalog, "ult_small", 1));
        cart.add(item(&catalog, "ult_small", 2));

        assert_eq!(cart.items_added().len(), 1);
        assert_eq!(cart.items_added()["ult_small"].quantity, 3);
    }

    #[test]
    fn test_add_passes_non_positive_quantities_through() {
        let (catalog, mut cart) = setup();

        cart.add(item(&catalog, "ult_large", 0));
        assert_eq!(cart.items_added()["ult_large"].quantity, 0);

        cart.add(item(&catalog, "ult_large", -2));
        assert_eq!(cart.items_added()["ult_large"].quantity, -2);
    }

    #[test]
    fn test_remove_partial() {
        let (catalog, mut cart) = setup();
        cart.add(item(&catalog, "ult_large", 5));

        cart.remove(&item(&catalog, "ult_large", 2));

        assert_eq!(cart.items_added()["ult_large"].quantity, 3);
    }

    #[test]
    fn test_remove_exact_quantity_drops_line() {
        let (catalog, mut cart) = setup();
        cart.add(item(&catalog, "ult_large", 5));

        cart.remove(&item(&catalog, "ult_large", 5));

        assert!(!cart.items_added().contains_key("ult_large"));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_over_removal_drops_line() {
        let (catalog, mut cart) = setup();
        cart.add(item(&catalog, "ult_large", 5));

        cart.remove(&item(&catalog, "ult_large", 2));
        cart.remove(&item(&catalog, "ult_large", 4));

        assert!(!cart.items_added().contains_key("ult_large"));
    }

    #[test]
    fn test_remove_missing_code_is_noop() {
        let (catalog, mut cart) = setup();
        cart.add(item(&catalog, "ult_small", 1));

        cart.remove(&item(&catalog, "ult_large", 1));

        assert_eq!(cart.items_added().len(), 1);
        assert_eq!(cart.items_added()["ult_small"].quantity, 1);
    }

    // -------------------------------------------------------------------------
    // promo codes
    // -------------------------------------------------------------------------

    #[test]
    fn test_add_promo_code() {
        let (_, mut cart) = setup();
        cart.add_promo_code("code");

        assert!(cart.uses_promo_code("code"));
        assert_eq!(cart.promo_codes_applied(), vec!["code".to_string()]);
    }

    #[test]
    fn test_promo_code_is_idempotent() {
        let (_, mut cart) = setup();
        cart.add_promo_code("I<3AMAYSIM");
        cart.add_promo_code("I<3AMAYSIM");

        assert!(cart.uses_promo_code("I<3AMAYSIM"));
        assert_eq!(cart.promo_codes_applied().len(), 1);
    }

    #[test]
    fn test_uses_promo_code() {
        let (_, mut cart) = setup();
        cart.add_promo_code("I<3AMAYSIM");

        assert!(!cart.uses_promo_code("QWERTY"));
        assert!(cart.uses_promo_code("I<3AMAYSIM"));
    }

    #[test]
    fn test_promo_codes_applied_is_sorted() {
        let (_, mut cart) = setup();
        assert!(cart.promo_codes_applied().is_empty());

        cart.add_promo_code("QWERTY");
        cart.add_promo_code("I<3AMAYSIM");

        assert_eq!(cart.promo_codes_applied(), vec!["I<3AMAYSIM", "QWERTY"]);
    }

    // -------------------------------------------------------------------------
    // total
    // -------------------------------------------------------------------------

    #[test]
    fn test_total_empty_cart() {
        let (_, cart) = setup();
        assert_eq!(cart.total(), Money::zero());
    }

    #[test]
    fn test_total_two_plain_items() {
        let (catalog, mut cart) = setup();
        cart.add(item(&catalog, "ult_small", 1));
        cart.add(item(&catalog, "1gb", 1));

        assert_eq!(cart.total().cents(), 3480);
    }

    #[test]
    fn test_total_buy_3_for_2() {
        let (catalog, mut cart) = setup();
        cart.add(item(&catalog, "ult_small", 3));
        cart.add(item(&catalog, "ult_large", 1));

        // 2 × 24.90 + 44.90
        assert_eq!(cart.total().cents(), 9470);
    }

    #[test]
    fn test_total_bulk_discount() {
        let (catalog, mut cart) = setup();
        cart.add(item(&catalog, "ult_large", 4));

        assert_eq!(cart.total().cents(), 15960);
        let large = find(&cart.items(), "ult_large").cloned().unwrap();
        assert_eq!(large.subtotal.cents(), 15960);
    }

    #[test]
    fn test_total_bulk_discount_with_other_items() {
        let (catalog, mut cart) = setup();
        cart.add(item(&catalog, "ult_small", 2));
        cart.add(item(&catalog, "ult_large", 4));

        assert_eq!(cart.total().cents(), 20940);
    }

    #[test]
    fn test_total_ignores_freebies() {
        let (catalog, mut cart) = setup();
        cart.add(item(&catalog, "ult_small", 1));
        cart.add(item(&catalog, "ult_medium", 2));

        assert_eq!(cart.total().cents(), 2490 + 5980);
    }

    #[test]
    fn test_total_unknown_promo_code_has_no_effect() {
        let (catalog, mut cart) = setup();
        cart.add(item(&catalog, "ult_small", 1));
        cart.add(item(&catalog, "1gb", 1));
        cart.add_promo_code("code");

        assert_eq!(cart.total().cents(), 3480);
    }

    #[test]
    fn test_total_overall_discount() {
        let (catalog, mut cart) = setup();
        cart.add(item(&catalog, "ult_small", 1));
        cart.add(item(&catalog, "1gb", 1));
        cart.add_promo_code("code");
        assert_eq!(cart.total().cents(), 3480);

        cart.add_promo_code("I<3AMAYSIM");
        assert_eq!(cart.total().cents(), 3132);
    }

    #[test]
    fn test_overall_discount_compounds_on_item_rules() {
        let (catalog, mut cart) = setup();
        cart.add(item(&catalog, "ult_small", 3));
        cart.add(item(&catalog, "ult_large", 4));
        cart.add_promo_code("I<3AMAYSIM");

        // (49.80 → 44.82) + (159.60 → 143.64)
        assert_eq!(cart.total().cents(), 4482 + 14364);
    }

    #[test]
    fn test_total_is_repeatable() {
        let (catalog, mut cart) = setup();
        cart.add(item(&catalog, "ult_small", 3));
        cart.add_promo_code("I<3AMAYSIM");

        assert_eq!(cart.total(), cart.total());
        assert!(cart.items_added()["ult_small"].subtotal.is_zero());
    }

    #[test]
    fn test_no_rules_prices_plainly() {
        let catalog = catalog();
        let mut cart = ShoppingCart::new(PricingRules::none());
        cart.add(item(&catalog, "ult_small", 3));
        cart.add(item(&catalog, "ult_large", 4));
        cart.add_promo_code("I<3AMAYSIM");

        assert_eq!(cart.total().cents(), 7470 + 17960);
    }

    // -------------------------------------------------------------------------
    // rule order
    // -------------------------------------------------------------------------

    #[test]
    fn test_rule_order_changes_result() {
        let catalog = catalog();
        let bogof = PricingRule::buy_one_get_one_free(&catalog).unwrap();
        let reordered = PricingRules::from_rules(vec![
            PricingRule::Buy3For2,
            bogof,
            PricingRule::OverallDiscountPromo,
            PricingRule::BulkDiscount,
        ]);

        let mut standard = ShoppingCart::new(PricingRules::standard(&catalog).unwrap());
        let mut swapped = ShoppingCart::new(reordered);
        for cart in [&mut standard, &mut swapped] {
            cart.add(item(&catalog, "ult_large", 4));
            cart.add_promo_code("I<3AMAYSIM");
        }

        assert_eq!(standard.total().cents(), 14364);
        // bulk price overwrites the discount when it runs last
        assert_eq!(swapped.total().cents(), 15960);
        assert_ne!(standard.total(), swapped.total());
    }

    // -------------------------------------------------------------------------
    // items
    // -------------------------------------------------------------------------

    #[test]
    fn test_items_contains_added_item() {
        let (catalog, mut cart) = setup();
        cart.add(item(&catalog, "ult_large", 1));

        let items = cart.items();
        let large = find(&items, "ult_large").unwrap();
        assert_eq!(large.quantity, 1);
        assert_eq!(large.subtotal.cents(), 4490);
    }

    #[test]
    fn test_items_include_freebies() {
        let (catalog, mut cart) = setup();
        cart.add(item(&catalog, "ult_small", 1));
        cart.add(item(&catalog, "ult_medium", 2));

        let items = cart.items();
        assert_eq!(items.len(), 3);

        let bonus = find(&items, "1gb").unwrap();
        assert_eq!(bonus.quantity, 2);
        assert!(bonus.subtotal.is_zero());
        assert_eq!(bonus.product.name, "1 GB Data-pack");

        // freebies never reach the added-items store
        assert!(!cart.items_added().contains_key("1gb"));
    }

    #[test]
    fn test_freebie_merges_into_added_item() {
        let (catalog, mut cart) = setup();
        cart.add(item(&catalog, "1gb", 1));
        cart.add(item(&catalog, "ult_medium", 2));

        let items = cart.items();
        assert_eq!(items.len(), 2);

        let bonus = find(&items, "1gb").unwrap();
        assert_eq!(bonus.quantity, 3);
        assert_eq!(bonus.subtotal.cents(), 990);

        assert_eq!(cart.items_added()["1gb"].quantity, 1);
        assert_eq!(cart.total().cents(), 990 + 5980);
    }

    #[test]
    fn test_non_positive_trigger_still_merges_into_bonus_line() {
        let (catalog, mut cart) = setup();
        cart.add(item(&catalog, "1gb", 3));
        cart.add(item(&catalog, "ult_medium", -1));

        let items = cart.items();
        assert_eq!(find(&items, "1gb").unwrap().quantity, 2);

        cart.remove(&item(&catalog, "ult_medium", -1));
        cart.add(item(&catalog, "ult_medium", 0));
        let items = cart.items();
        assert_eq!(find(&items, "1gb").unwrap().quantity, 3);
        assert_eq!(find(&items, "ult_medium").unwrap().quantity, 0);
    }

    #[test]
    fn test_items_empty_cart() {
        let (_, cart) = setup();
        assert!(cart.items().is_empty());
    }

    // -------------------------------------------------------------------------
    // summary / lifecycle
    // -------------------------------------------------------------------------

    #[test]
    fn test_summary() {
        let (catalog, mut cart) = setup();
        cart.add(item(&catalog, "ult_small", 3));
        cart.add(item(&catalog, "ult_medium", 1));
        cart.add_promo_code("QWERTY");

        let summary = cart.summary();
        assert_eq!(summary.item_count, 2);
        assert_eq!(summary.total_quantity, 4);
        assert_eq!(summary.promo_codes, vec!["QWERTY"]);
        assert_eq!(summary.added.len(), 2);
        assert_eq!(summary.items.len(), 3);
        assert_eq!(summary.total, cart.total());
        assert_eq!(summary.total.cents(), 4980 + 2990);
    }

    #[test]
    fn test_summary_serializes_camel_case() {
        let (catalog, mut cart) = setup();
        cart.add(item(&catalog, "1gb", 1));

        let json = serde_json::to_value(cart.summary()).unwrap();
        assert_eq!(json["itemCount"], 1);
        assert_eq!(json["total"], 990);
    }

    #[test]
    fn test_clear() {
        let (catalog, mut cart) = setup();
        cart.add(item(&catalog, "ult_small", 2));
        cart.add_promo_code("I<3AMAYSIM");

        cart.clear();

        assert!(cart.is_empty());
        assert!(cart.promo_codes_applied().is_empty());
        assert_eq!(cart.rules().len(), 4);
    }

    #[test]
    fn test_huge_quantities_saturate() {
        let (catalog, mut cart) = setup();
        cart.add(item(&catalog, "1gb", i64::MAX / 100));
        assert_eq!(cart.total(), Money::from_cents(i64::MAX));

        cart.add(item(&catalog, "1gb", i64::MAX));
        assert_eq!(cart.items_added()["1gb"].quantity, i64::MAX);

        cart.add(item(&catalog, "ult_medium", i64::MAX));
        cart.add(item(&catalog, "ult_small", i64::MAX / 100));
        cart.add(item(&catalog, "ult_large", i64::MAX / 100));
        cart.add_promo_code("I<3AMAYSIM");

        let summary = cart.summary();
        assert_eq!(summary.total_quantity, i64::MAX);
        assert_eq!(find(&summary.items, "1gb").unwrap().quantity, i64::MAX);
        assert_eq!(summary.total, cart.total());
    }

    #[test]
    fn test_custom_product_outside_catalog() {
        let (_, mut cart) = setup();
        let gift = Product::new("gift", "Gift Card", Money::from_cents(1000));
        cart.add(CartItem::new(gift, 2));

        assert_eq!(cart.total().cents(), 2000);
    }
}
