//! Money rendering.
//!
//! Amounts leave the API as exact decimal strings, never floats.

use folio::prices::to_decimal;
use rusty_money::{Money, iso::Currency};

/// Decimal string for `money`, e.g. `"34.48"`.
pub(crate) fn amount(money: &Money<'_, Currency>) -> String {
    to_decimal(money).to_string()
}

/// ISO code of `money`'s currency.
pub(crate) fn currency_code(money: &Money<'_, Currency>) -> String {
    money.currency().iso_alpha_code.to_string()
}
