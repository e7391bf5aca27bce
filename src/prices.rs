//! Prices
//!
//! Prices are held as integer minor units of a `rusty_money` currency, so cart
//! arithmetic is exact. Decimal strings cross the boundary in both directions.

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, USD},
};
use thiserror::Error;

/// Largest catalog price in minor units (`9999.99`).
pub const MAX_PRICE_MINOR: i64 = 999_999;

/// Every supported currency has two decimal places.
const MINOR_UNIT_SCALE: u32 = 2;

/// Errors raised while parsing prices.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceError {
    /// Not in `"AMOUNT CURRENCY"` form, or the amount is not a decimal.
    #[error("invalid price format: {0}")]
    InvalidFormat(String),

    /// Amount has more precision than the currency's minor unit.
    #[error("price {0} has more than two decimal places")]
    TooPrecise(String),

    /// Currency code is not supported.
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),
}

/// Resolve a supported ISO currency code.
///
/// # Errors
///
/// Returns [`PriceError::UnknownCurrency`] for anything other than GBP, USD or EUR.
pub fn currency_from_code(code: &str) -> Result<&'static Currency, PriceError> {
    match code {
        "GBP" => Ok(GBP),
        "USD" => Ok(USD),
        "EUR" => Ok(EUR),
        other => Err(PriceError::UnknownCurrency(other.to_string())),
    }
}

/// Convert a decimal amount into exact minor units.
///
/// # Errors
///
/// Returns [`PriceError::TooPrecise`] when the amount has sub-minor-unit digits,
/// or [`PriceError::InvalidFormat`] when it does not fit in minor units.
pub fn minor_units(amount: Decimal) -> Result<i64, PriceError> {
    let scaled = amount
        .checked_mul(Decimal::new(100, 0))
        .ok_or_else(|| PriceError::InvalidFormat(amount.to_string()))?;

    if !scaled.fract().is_zero() {
        return Err(PriceError::TooPrecise(amount.to_string()));
    }

    scaled
        .to_i64()
        .ok_or_else(|| PriceError::InvalidFormat(amount.to_string()))
}

/// Parse a price string such as `"9.99 USD"`.
///
/// # Errors
///
/// Returns a [`PriceError`] if the string is not `"AMOUNT CURRENCY"`, the
/// amount is not exact in minor units, or the currency is unknown.
pub fn parse_price(s: &str) -> Result<Money<'static, Currency>, PriceError> {
    let mut parts = s.split_whitespace();

    let (Some(amount), Some(code), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(PriceError::InvalidFormat(format!(
            "expected 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| PriceError::InvalidFormat(s.to_string()))?;

    let currency = currency_from_code(code)?;

    Ok(Money::from_minor(minor_units(amount)?, currency))
}

/// Parse a bare decimal amount (e.g. `"14.50"`) in the given currency.
///
/// # Errors
///
/// Returns a [`PriceError`] if the amount is not a decimal or not exact in minor units.
pub fn parse_amount(
    amount: &str,
    currency: &'static Currency,
) -> Result<Money<'static, Currency>, PriceError> {
    let amount = amount
        .trim()
        .parse::<Decimal>()
        .map_err(|_err| PriceError::InvalidFormat(amount.to_string()))?;

    Ok(Money::from_minor(minor_units(amount)?, currency))
}

/// Exact decimal amount of a money value, e.g. `34.48`.
pub fn to_decimal(money: &Money<'_, Currency>) -> Decimal {
    Decimal::new(money.to_minor_units(), MINOR_UNIT_SCALE)
}
