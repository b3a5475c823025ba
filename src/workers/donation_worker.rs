use std::sync::Arc;

use tracing::{debug, warn};

use crate::aggregator::Aggregator;
use crate::gateway::{ChargeRequest, PaymentGateway, TokenRequest};
use crate::models::{ChargeOutcome, DonationError, Donor, OutcomeStatus, RawRecord};
use crate::types::{Amount, Currency};

/// Turns one raw record into a settled or faulty charge.
///
/// Faults never escape a worker: every record ends as a `ChargeOutcome`.
/// There are no retries, a failed tokenize or charge is final.
pub struct DonationWorker<G: PaymentGateway> {
    gateway: Arc<G>,
    currency: Currency
}

impl<G: PaymentGateway> Clone for DonationWorker<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
            currency: self.currency.clone()
        }
    }
}

impl<G: PaymentGateway> DonationWorker<G> {
    pub fn new(gateway: Arc<G>, currency: Currency) -> Self {
        Self { gateway, currency }
    }

    /// Processes `line` and records its outcome with `aggregator`.
    pub async fn donate(&self, line: &str, aggregator: &Aggregator) {
        let outcome = self.process(line).await;

        match &outcome.status {
            OutcomeStatus::Charged { charge_id } => {
                debug!("Donation from [{}] charged [{}] as [{charge_id}]", outcome.donor_name, outcome.charged);
            }
            OutcomeStatus::Faulty(error) if error.is_malformed_record() => {
                warn!("Malformed record counted as faulty donation: {error}");
            }
            OutcomeStatus::Faulty(error) => {
                warn!("Faulty donation: {error}");
            }
        }

        aggregator.record(&outcome).await;
    }

    pub async fn process(&self, line: &str) -> ChargeOutcome {
        let record = match RawRecord::parse(line) {
            Ok(record) => record,
            Err(error) => {
                let name = line.split(',').next().unwrap_or_default().trim().to_string();
                return ChargeOutcome::faulty(name, Amount::ZERO, error);
            }
        };

        let donor = match Donor::from_record(&record, &self.currency) {
            Ok(donor) => donor,
            Err(error) => return ChargeOutcome::faulty(record.name().to_string(), record.requested(), error)
        };

        match self.charge(&donor).await {
            Ok((charge_id, charged)) => ChargeOutcome::charged(donor.name, donor.amount, charged, charge_id),
            Err(error) => ChargeOutcome::faulty(donor.name, donor.amount, error)
        }
    }

    async fn charge(&self, donor: &Donor) -> Result<(String, Amount), DonationError> {
        let token_request = TokenRequest {
            name: donor.name.clone(),
            number: donor.card_number.clone(),
            expiration_month: donor.expiry_month,
            expiration_year: donor.expiry_year
        };

        let token = self.gateway.create_token(&token_request).await
            .map_err(|error| DonationError::tokenization(&donor.name, error))?;

        let charge_request = ChargeRequest {
            amount: donor.amount,
            currency: donor.currency.clone(),
            card: token.id
        };

        let charge = self.gateway.create_charge(&charge_request).await
            .map_err(|error| DonationError::charge(&donor.name, error))?;

        Ok((charge.id, charge.amount))
    }
}
