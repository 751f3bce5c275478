//! Money type for representing monetary values.
//!
//! Amounts are unsigned integers in the currency's smallest unit (paise,
//! cents), so prices can never go negative and totals never drift.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    INR,
    USD,
    EUR,
    GBP,
}

impl Currency {
    /// Get the currency code (e.g., "INR").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::INR => "INR",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
        }
    }

    /// Get the currency symbol (e.g., "₹").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::INR => "\u{20b9}",
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
        }
    }

    /// Number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        2
    }

    /// Minor units per major unit (100 for paise per rupee).
    pub fn minor_per_major(&self) -> u64 {
        10_u64.pow(self.decimal_places())
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "INR" => Some(Currency::INR),
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            _ => None,
        }
    }

    /// Group integer digits the way this currency's locale does.
    ///
    /// INR uses lakh grouping (`12,34,567`); the rest group by thousands.
    fn group_digits(&self, whole: u64) -> String {
        let digits = whole.to_string();
        if digits.len() <= 3 {
            return digits;
        }

        let (head, tail) = digits.split_at(digits.len() - 3);
        let step = match self {
            Currency::INR => 2,
            _ => 3,
        };

        let mut groups: Vec<&str> = Vec::new();
        let mut end = head.len();
        while end > 0 {
            let start = end.saturating_sub(step);
            groups.push(&head[start..end]);
            end = start;
        }
        groups.reverse();
        groups.push(tail);
        groups.join(",")
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit.
    pub amount_minor: u64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from minor units.
    pub fn new(amount_minor: u64, currency: Currency) -> Self {
        Self {
            amount_minor,
            currency,
        }
    }

    /// Create a Money value from whole major units (rupees, dollars).
    ///
    /// Returns `None` on overflow.
    pub fn from_major(amount: u64, currency: Currency) -> Option<Self> {
        amount
            .checked_mul(currency.minor_per_major())
            .map(|minor| Self::new(minor, currency))
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_minor == 0
    }

    /// Multiply by a quantity, returning `None` on overflow.
    pub fn checked_mul(&self, quantity: u64) -> Option<Money> {
        self.amount_minor
            .checked_mul(quantity)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Add another amount, returning `None` on currency mismatch or overflow.
    pub fn checked_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.amount_minor
            .checked_add(other.amount_minor)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Format as a display string (e.g., "₹1,23,456" or "₹499.50").
    ///
    /// The fractional part is omitted when it is zero.
    pub fn display(&self) -> String {
        format!("{}{}", self.currency.symbol(), self.display_amount())
    }

    /// Format without the currency symbol.
    pub fn display_amount(&self) -> String {
        let per_major = self.currency.minor_per_major();
        let whole = self.amount_minor / per_major;
        let fraction = self.amount_minor % per_major;
        let grouped = self.currency.group_digits(whole);

        if fraction == 0 {
            grouped
        } else {
            let places = self.currency.decimal_places() as usize;
            format!("{grouped}.{fraction:0places$}")
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}
