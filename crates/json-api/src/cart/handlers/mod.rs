//! Cart Handlers

pub(crate) mod add_item;
pub(crate) mod checkout;
pub(crate) mod get;
