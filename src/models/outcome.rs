use crate::models::DonationError;
use crate::types::Amount;

/// How a single donation attempt ended.
#[derive(Debug)]
pub enum OutcomeStatus {
    Charged {
        charge_id: String
    },
    Faulty(DonationError)
}

/// The result of processing one record, handed to the aggregator.
#[derive(Debug)]
pub struct ChargeOutcome {
    pub donor_name: String,
    pub requested: Amount,
    /// Zero unless the charge settled.
    pub charged: Amount,
    pub status: OutcomeStatus
}

impl ChargeOutcome {
    pub fn charged(donor_name: String, requested: Amount, charged: Amount, charge_id: String) -> Self {
        Self {
            donor_name,
            requested,
            charged,
            status: OutcomeStatus::Charged { charge_id }
        }
    }

    pub fn faulty(donor_name: String, requested: Amount, error: DonationError) -> Self {
        Self {
            donor_name,
            requested,
            charged: Amount::ZERO,
            status: OutcomeStatus::Faulty(error)
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.status, OutcomeStatus::Charged { .. })
    }
}
