use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{is_three_letter_code, CoreError, CoreResult};

/// A currency-tagged amount. Arithmetic never converts between currencies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "MoneyRecord")]
pub struct Money {
    amount: Decimal,
    currency: String,
}

#[derive(Deserialize)]
struct MoneyRecord {
    amount: Decimal,
    currency: String,
}

impl TryFrom<MoneyRecord> for Money {
    type Error = CoreError;

    fn try_from(record: MoneyRecord) -> CoreResult<Self> {
        Money::new(record.amount, &record.currency)
    }
}

impl Money {
    /// Currency codes are normalised to upper case.
    pub fn new(amount: Decimal, currency: &str) -> CoreResult<Self> {
        let currency = currency.trim().to_ascii_uppercase();
        if !is_three_letter_code(&currency) {
            return Err(CoreError::ValidationError(format!(
                "currency must be a 3-letter code, got '{}'",
                currency
            )));
        }
        Ok(Self { amount, currency })
    }

    pub fn zero(currency: &str) -> CoreResult<Self> {
        Self::new(Decimal::ZERO, currency)
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn add(&self, other: &Money) -> CoreResult<Money> {
        if self.currency != other.currency {
            return Err(CoreError::CurrencyMismatch {
                left: self.currency.clone(),
                right: other.currency.clone(),
            });
        }
        Ok(Money {
            amount: self.amount + other.amount,
            currency: self.currency.clone(),
        })
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}
