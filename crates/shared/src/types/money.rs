//! Money type with decimal precision and currency.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! This type wraps `rust_decimal::Decimal` for arbitrary precision.
//!
//! `Money` is constructed only through [`Money::new`], which rejects any
//! amount more precise than the currency's minor unit. Arithmetic is only
//! defined between same-currency values and always returns a fresh value.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// ISO 4217 currency codes supported by the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// US Dollar
    Usd,
    /// Euro
    Eur,
    /// Indonesian Rupiah
    Idr,
    /// Singapore Dollar
    Sgd,
    /// Japanese Yen
    Jpy,
}

impl Currency {
    /// Number of digits after the decimal point in this currency's
    /// canonical representation (the ISO 4217 minor unit).
    #[must_use]
    pub const fn fraction_digits(self) -> u32 {
        match self {
            Self::Usd | Self::Eur | Self::Idr | Self::Sgd => 2,
            Self::Jpy => 0,
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Usd => write!(f, "USD"),
            Self::Eur => write!(f, "EUR"),
            Self::Idr => write!(f, "IDR"),
            Self::Sgd => write!(f, "SGD"),
            Self::Jpy => write!(f, "JPY"),
        }
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "USD" => Ok(Self::Usd),
            "EUR" => Ok(Self::Eur),
            "IDR" => Ok(Self::Idr),
            "SGD" => Ok(Self::Sgd),
            "JPY" => Ok(Self::Jpy),
            _ => Err(format!("Unknown currency: {s}")),
        }
    }
}

/// Errors from constructing or combining [`Money`] values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoneyError {
    /// The amount is more precise than the currency's minor unit allows.
    #[error("Amount has too many decimal places for {currency} (max {max}, got {scale})")]
    InvalidAmount {
        /// The effective scale of the rejected amount.
        scale: u32,
        /// The currency's fraction-digit limit.
        max: u32,
        /// The target currency.
        currency: Currency,
    },

    /// Arithmetic between two different currencies.
    #[error("Currency mismatch: {left} vs {right}")]
    CurrencyMismatch {
        /// Currency of the left operand.
        left: Currency,
        /// Currency of the right operand.
        right: Currency,
    },
}

/// Represents a monetary amount with currency.
///
/// Uses `Decimal` internally to avoid floating-point precision errors.
/// Two values are equal only if both amount and currency match. All
/// operations are pure; nothing here mutates in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawMoney")]
pub struct Money {
    /// The amount, held at the currency's canonical scale.
    amount: Decimal,
    /// ISO 4217 currency code.
    currency: Currency,
}

/// Wire shape for deserializing [`Money`] through the validating constructor.
#[derive(Debug, Deserialize)]
struct RawMoney {
    amount: Decimal,
    currency: Currency,
}

impl TryFrom<RawMoney> for Money {
    type Error = MoneyError;

    fn try_from(raw: RawMoney) -> Result<Self, Self::Error> {
        Self::new(raw.amount, raw.currency)
    }
}

impl Money {
    /// Creates a new Money value.
    ///
    /// The amount's effective precision must not exceed the currency's
    /// fraction digits; excess precision is rejected, never rounded.
    /// Accepted amounts are stored at exactly the canonical scale, so
    /// `10.5 USD` and `10.50 USD` are the same value.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::InvalidAmount`] if the amount is too precise
    /// for the currency.
    pub fn new(amount: Decimal, currency: Currency) -> Result<Self, MoneyError> {
        let max = currency.fraction_digits();
        let scale = amount.normalize().scale();
        if scale > max {
            return Err(MoneyError::InvalidAmount {
                scale,
                max,
                currency,
            });
        }

        let mut amount = amount;
        amount.rescale(max);
        Ok(Self { amount, currency })
    }

    /// Creates a zero amount in the specified currency, scaled to the
    /// currency's fraction digits.
    #[must_use]
    pub fn zero(currency: Currency) -> Self {
        let mut amount = Decimal::ZERO;
        amount.rescale(currency.fraction_digits());
        Self { amount, currency }
    }

    /// Returns the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns the currency.
    #[must_use]
    pub const fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns the componentwise sum of this and `other`.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::CurrencyMismatch`] if the currencies differ.
    pub fn add(&self, other: &Self) -> Result<Self, MoneyError> {
        if self.currency != other.currency {
            return Err(MoneyError::CurrencyMismatch {
                left: self.currency,
                right: other.currency,
            });
        }
        Ok(Self {
            amount: self.amount + other.amount,
            currency: self.currency,
        })
    }

    /// Returns the additive inverse, same currency.
    #[must_use]
    pub fn negate(&self) -> Self {
        Self {
            amount: -self.amount,
            currency: self.currency,
        }
    }

    /// Returns true if the amount is strictly below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}
