mod donor;
mod errors;
mod outcome;
mod record;

pub use donor::Donor;
pub use errors::DonationError;
pub use outcome::{ChargeOutcome, OutcomeStatus};
pub use record::RawRecord;
