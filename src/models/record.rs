use csv::{ReaderBuilder, StringRecord, Trim};
use std::str::FromStr;

use crate::models::DonationError;
use crate::types::Amount;

/// The string fields of one donation line, exactly as split from the input.
///
/// Field order: name, amount in subunits, card number, CVV, expiry month,
/// expiry year. The field count is not enforced here so that faulty records
/// can still report who they were for.
#[derive(Debug, Clone)]
pub struct RawRecord {
    fields: StringRecord
}

impl RawRecord {
    pub const FIELD_COUNT: usize = 6;

    pub const NAME: usize = 0;
    pub const AMOUNT: usize = 1;
    pub const CARD_NUMBER: usize = 2;
    pub const EXPIRY_MONTH: usize = 4;
    pub const EXPIRY_YEAR: usize = 5;

    pub fn parse(line: &str) -> Result<Self, DonationError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(line.as_bytes());

        let mut fields = StringRecord::new();

        if !reader.read_record(&mut fields).map_err(|error| DonationError::unreadable(line, error))? {
            return Err(DonationError::field_count(line, 0));
        }

        Ok(Self { fields })
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn field(&self, index: usize) -> &str {
        self.fields.get(index).unwrap_or_default()
    }

    pub fn name(&self) -> &str {
        self.field(Self::NAME)
    }

    /// The requested amount, or zero when the amount field is unusable.
    pub fn requested(&self) -> Amount {
        Amount::from_str(self.field(Self::AMOUNT))
            .ok()
            .filter(|amount| !amount.is_negative())
            .unwrap_or_default()
    }
}
