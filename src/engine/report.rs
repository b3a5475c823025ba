use std::fmt;
use std::fmt::{Display, Formatter};

use rust_decimal::Decimal;

use crate::aggregator::AggregateState;
use crate::types::{Amount, Currency};

const TOP_DONOR_COUNT: usize = 3;

/// Summary of a finished donation batch.
#[derive(Debug, Clone)]
pub struct Report {
    pub currency: Currency,
    pub records: usize,
    pub total_requested: Amount,
    pub total_charged: Amount,
    pub faulty_amount: Amount,
    pub faulty_records: usize,
    /// Charged money per dispatched record, in major units.
    pub average: Decimal,
    pub top_donors: Vec<String>
}

impl Report {
    pub fn summarize(state: &AggregateState, currency: &str) -> Self {
        Self {
            currency: currency.to_uppercase(),
            records: state.processed,
            total_requested: state.total_requested,
            total_charged: state.total_charged,
            faulty_amount: state.faulty_amount(),
            faulty_records: state.faulty,
            average: average(state.total_charged, state.processed),
            top_donors: state.top_donors(TOP_DONOR_COUNT)
                .into_iter()
                .map(|(_, name)| name.to_string())
                .collect()
        }
    }
}

fn average(total: Amount, records: usize) -> Decimal {
    if records == 0 {
        return Decimal::ZERO;
    }

    (Decimal::new(total.subunits(), 2) / Decimal::from(records)).round_dp(2)
}

impl Display for Report {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        let currency = &self.currency;

        writeln!(formatter, "        total received: {currency} {}", self.total_requested)?;
        writeln!(formatter, "  successfully donated: {currency} {}", self.total_charged)?;
        writeln!(formatter, "       faulty donation: {currency} {} ({} of {} records)", self.faulty_amount, self.faulty_records, self.records)?;
        writeln!(formatter, "    average per person: {currency} {:.2}", self.average)?;
        write!(formatter, "            top donors:")?;

        if self.top_donors.is_empty() {
            write!(formatter, " none")?;
        }

        for donor in &self.top_donors {
            write!(formatter, "\n                        {donor}")?;
        }

        writeln!(formatter)
    }
}
