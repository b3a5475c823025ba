use crate::types::errors::AmountError;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::ops::AddAssign;
use std::str::FromStr;
use tracing::error;

const DECIMAL_PLACES: usize = 2;
const SCALE: i64 = 10i64.pow(DECIMAL_PLACES as u32);

/// A sum of money held in the currency's minor unit (satang for THB).
///
/// Input files and the gateway both speak in minor units, so parsing reads
/// an integer count of them. `Display` renders major units with two decimals.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Amount(i64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    pub fn from_subunits(subunits: i64) -> Self {
        Amount(subunits)
    }

    pub fn subunits(&self) -> i64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub fn checked_add(self, rhs: Amount) -> Option<Amount> {
        self.0.checked_add(rhs.0).map(Amount)
    }

    pub fn checked_sub(self, rhs: Amount) -> Option<Amount> {
        self.0.checked_sub(rhs.0).map(Amount)
    }
}

impl AddAssign<Amount> for Amount {
    fn add_assign(&mut self, rhs: Amount) {
        if let Some(sum) = self.checked_add(rhs) {
            self.0 = sum.0;
        } else {
            error!("Amount AddAssign error: Overflow")
        }
    }
}

impl Display for Amount {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let integer = abs / SCALE as u64;
        let fraction = abs % SCALE as u64;
        write!(formatter, "{}{}.{:0width$}", sign, integer, fraction, width = DECIMAL_PLACES)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        if value.is_empty() {
            return Err(AmountError::InvalidFormat("Value is an empty string".to_string()));
        }

        if value.contains('.') {
            return Err(AmountError::InvalidFormat(format!("Value [{value}] must be a whole number of subunits")));
        }

        Ok(Amount(value.parse()?))
    }
}
