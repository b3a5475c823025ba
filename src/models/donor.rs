use std::fmt;
use std::str::FromStr;

use crate::models::{DonationError, RawRecord};
use crate::types::{Amount, Currency};

/// A validated donation ready to be tokenized and charged.
#[derive(Clone)]
pub struct Donor {
    pub name: String,
    pub amount: Amount,
    pub currency: Currency,
    pub card_number: String,
    pub expiry_month: u8,
    pub expiry_year: u16
}

impl Donor {
    /// Validates a raw record.
    ///
    /// # Errors
    /// Returns `DonationError` if:
    /// - The record does not have exactly six fields.
    /// - The amount is not a whole number of subunits, or is negative.
    /// - The expiry month is outside 1..=12 or the expiry year is not a year.
    pub fn from_record(record: &RawRecord, currency: &str) -> Result<Self, DonationError> {
        if record.len() != RawRecord::FIELD_COUNT {
            return Err(DonationError::field_count(record.name(), record.len()));
        }

        let amount = Amount::from_str(record.field(RawRecord::AMOUNT))
            .map_err(|error| DonationError::invalid_amount(record.name(), error))?;

        if amount.is_negative() {
            return Err(DonationError::negative_amount(record.name(), amount));
        }

        let month_field = record.field(RawRecord::EXPIRY_MONTH);
        let expiry_month = month_field.parse::<u8>().ok()
            .filter(|month| (1..=12).contains(month))
            .ok_or_else(|| DonationError::invalid_expiry(record.name(), month_field, record.field(RawRecord::EXPIRY_YEAR)))?;

        let year_field = record.field(RawRecord::EXPIRY_YEAR);
        let expiry_year = year_field.parse::<u16>()
            .map_err(|_| DonationError::invalid_expiry(record.name(), month_field, year_field))?;

        Ok(Self {
            name: record.name().to_string(),
            amount,
            currency: currency.to_string(),
            card_number: record.field(RawRecord::CARD_NUMBER).to_string(),
            expiry_month,
            expiry_year
        })
    }

    /// The card number with everything but the last four digits hidden.
    pub fn masked_card(&self) -> String {
        let visible = self.card_number.len().saturating_sub(4);
        let tail = self.card_number.get(visible..).unwrap_or_default();

        format!("{}{}", "*".repeat(visible), tail)
    }
}

impl fmt::Debug for Donor {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("Donor")
            .field("name", &self.name)
            .field("amount", &self.amount)
            .field("currency", &self.currency)
            .field("card_number", &self.masked_card())
            .field("expiry_month", &self.expiry_month)
            .field("expiry_year", &self.expiry_year)
            .finish()
    }
}
