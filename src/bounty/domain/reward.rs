//! Validated reward value for a posted bounty.

use super::BountyDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Monetary reward attached to a bounty at posting time.
///
/// The amount and currency are immutable once the bounty is created; no
/// lifecycle transition touches them. The core performs no arithmetic on
/// the amount, it only carries it through to settlement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reward {
    amount: f64,
    currency: String,
}

impl Reward {
    /// Longest currency code accepted by the storage schema.
    const MAX_CURRENCY_LEN: usize = 10;

    /// Creates a validated reward.
    ///
    /// # Errors
    ///
    /// Returns [`BountyDomainError::InvalidRewardAmount`] when the amount is
    /// not finite or not strictly positive, and
    /// [`BountyDomainError::InvalidCurrency`] when the currency code is empty
    /// or exceeds the schema-backed length limit.
    pub fn new(amount: f64, currency: impl Into<String>) -> Result<Self, BountyDomainError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(BountyDomainError::InvalidRewardAmount(amount));
        }

        let raw = currency.into();
        let normalized = raw.trim();
        if normalized.is_empty() || normalized.len() > Self::MAX_CURRENCY_LEN {
            return Err(BountyDomainError::InvalidCurrency(raw));
        }

        Ok(Self {
            amount,
            currency: normalized.to_ascii_uppercase(),
        })
    }

    /// Returns the reward amount.
    #[must_use]
    pub const fn amount(&self) -> f64 {
        self.amount
    }

    /// Returns the normalized currency code.
    #[must_use]
    pub fn currency(&self) -> &str {
        &self.currency
    }
}

impl fmt::Display for Reward {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}
