mod amount;
mod errors;

pub use amount::Amount;
pub use errors::AmountError;

/// ISO 4217 code in the lowercase form the gateway expects (e.g. `thb`).
pub type Currency = String;
