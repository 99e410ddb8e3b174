//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In float32 arithmetic:                                                 │
//! │    24.90 + 9.90 = 34.800003  ❌ needs "round down to 2 places" hacks    │
//! │    34.80 × 0.9  = 31.320002                                             │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    2490 + 990 = 3480 cents                                              │
//! │    3480 - 10% = 3132 cents                                              │
//! │    Every total is exact and comparable with ==                          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use simcart_core::money::Money;
//!
//! let price = Money::from_cents(2490); // $24.90
//!
//! let doubled = price * 2;                     // $49.80
//! let total = price + Money::from_cents(990);  // $34.80
//! assert_eq!(total.apply_percentage_discount(1000).cents(), 3132);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in cents.
///
/// ## Design Decisions
/// - **i64 (signed)**: discounts are subtracted, and the cart accepts
///   non-positive quantities, so intermediate values can go negative
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Saturating arithmetic**: quantities are not bounded by the core, so
///   products and sums clamp at the `i64` limits instead of overflowing
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Catalog "Price": 24.90 ──► Product.price ──► CartItem.subtotal         │
/// │                                                    │                    │
/// │                                   pricing rules ◄──┘                    │
/// │                                        │                                │
/// │                                        ▼                                │
/// │                               ShoppingCart::total()                     │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use simcart_core::money::Money;
    ///
    /// let price = Money::from_cents(2490); // Represents $24.90
    /// assert_eq!(price.cents(), 2490);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units (dollars and cents).
    ///
    /// ## Example
    /// ```rust
    /// use simcart_core::money::Money;
    ///
    /// let price = Money::from_major_minor(39, 90); // $39.90
    /// assert_eq!(price.cents(), 3990);
    ///
    /// let negative = Money::from_major_minor(-5, 50);
    /// assert_eq!(negative.cents(), -550);
    /// ```
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Converts a decimal price, as written in the catalog JSON, to Money.
    ///
    /// Rounds to the nearest cent. Returns `None` for NaN, infinities and
    /// values that do not fit in an `i64` number of cents.
    ///
    /// Only the catalog boundary should call this; everything past it works
    /// in cents.
    ///
    /// ## Example
    /// ```rust
    /// use simcart_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal(24.90), Some(Money::from_cents(2490)));
    /// assert_eq!(Money::from_decimal(f64::NAN), None);
    /// ```
    pub fn from_decimal(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let cents = (value * 100.0).round();
        if cents < i64::MIN as f64 || cents > i64::MAX as f64 {
            return None;
        }
        Some(Money(cents as i64))
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity, saturating at the `i64` bounds.
    ///
    /// ## Example
    /// ```rust
    /// use simcart_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(4490); // $44.90
    /// assert_eq!(unit_price.multiply_quantity(4).cents(), 17960);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Applies a percentage discount and returns the discounted amount.
    ///
    /// The discount itself is rounded half-up to the cent before it is
    /// subtracted.
    ///
    /// ## Arguments
    /// * `discount_bps` - Discount in basis points (1000 = 10%)
    ///
    /// ## Example
    /// ```rust
    /// use simcart_core::money::Money;
    ///
    /// let subtotal = Money::from_cents(3480); // $34.80
    /// let discounted = subtotal.apply_percentage_discount(1000); // 10% off
    /// assert_eq!(discounted.cents(), 3132); // $31.32
    /// ```
    pub fn apply_percentage_discount(&self, discount_bps: u32) -> Money {
        // i128 keeps large subtotals from overflowing mid-calculation
        let discount_amount = (self.0 as i128 * discount_bps as i128 + 5000) / 10000;
        Money::from_cents(self.0.saturating_sub(discount_amount as i64))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money as `$24.90`, the format the shell prints.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

/// Multiplication by quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

/// Summing subtotals into a cart total.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
