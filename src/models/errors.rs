use crate::gateway::GatewayError;
use crate::types::{Amount, AmountError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DonationError {
    #[error("Record for donor [{donor}] could not be read: {source}")]
    Unreadable {
        donor: String,
        source: csv::Error
    },
    #[error("Record for donor [{donor}] has [{found}] fields, expected [{expected}]")]
    FieldCount {
        donor: String,
        found: usize,
        expected: usize
    },
    #[error("Record for donor [{donor}] has an invalid amount: {source}")]
    InvalidAmount {
        donor: String,
        source: AmountError
    },
    #[error("Record for donor [{donor}] has a negative amount [{amount}]")]
    NegativeAmount {
        donor: String,
        amount: Amount
    },
    #[error("Record for donor [{donor}] has an invalid card expiry [{month}/{year}]")]
    InvalidExpiry {
        donor: String,
        month: String,
        year: String
    },
    #[error("Card for donor [{donor}] could not be tokenized: {source}")]
    Tokenization {
        donor: String,
        source: GatewayError
    },
    #[error("Charge for donor [{donor}] failed: {source}")]
    Charge {
        donor: String,
        source: GatewayError
    }
}

impl DonationError {
    /// Keeps only the leading name field of `line`; the rest may hold card data.
    pub fn unreadable(line: &str, source: csv::Error) -> Self {
        let donor = line.split(',').next().unwrap_or_default().trim();
        Self::Unreadable { donor: donor.to_string(), source }
    }

    pub fn field_count(donor: &str, found: usize) -> Self {
        Self::FieldCount {
            donor: donor.to_string(),
            found,
            expected: crate::models::RawRecord::FIELD_COUNT
        }
    }

    pub fn invalid_amount(donor: &str, source: AmountError) -> Self {
        Self::InvalidAmount { donor: donor.to_string(), source }
    }

    pub fn negative_amount(donor: &str, amount: Amount) -> Self {
        Self::NegativeAmount { donor: donor.to_string(), amount }
    }

    pub fn invalid_expiry(donor: &str, month: &str, year: &str) -> Self {
        Self::InvalidExpiry {
            donor: donor.to_string(),
            month: month.to_string(),
            year: year.to_string()
        }
    }

    pub fn tokenization(donor: &str, source: GatewayError) -> Self {
        Self::Tokenization { donor: donor.to_string(), source }
    }

    pub fn charge(donor: &str, source: GatewayError) -> Self {
        Self::Charge { donor: donor.to_string(), source }
    }

    /// True for faults raised before the gateway was contacted.
    pub fn is_malformed_record(&self) -> bool {
        !matches!(self, Self::Tokenization { .. } | Self::Charge { .. })
    }
}
