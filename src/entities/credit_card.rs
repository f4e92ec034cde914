//! Credit card funding source with a derived spending limit

use crate::core::error::ValidationError;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A credit card that can back at most one payment method
///
/// The card stores its total `credit_limit` and the `amount_owed` on it.
/// The remaining headroom is always derived via [`CreditCard::limit_left`]
/// and is deliberately not a stored field, so it can never go stale or
/// feed back into itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditCard {
    /// Unique identifier for this card
    pub id: Uuid,

    /// Total credit limit granted on this card, never negative
    pub credit_limit: Decimal,

    /// Amount currently owed on this card, never negative
    pub amount_owed: Decimal,

    /// Expiration date of the card
    pub expiration: NaiveDate,

    /// When this card was created
    pub created_at: DateTime<Utc>,

    /// When this card was last updated
    pub updated_at: DateTime<Utc>,
}

impl CreditCard {
    /// Create a new card, rejecting negative limits and balances
    pub fn new(
        credit_limit: Decimal,
        amount_owed: Decimal,
        expiration: NaiveDate,
    ) -> Result<Self, ValidationError> {
        if credit_limit < Decimal::ZERO {
            return Err(ValidationError::NegativeAmount {
                field: "credit_limit",
                amount: credit_limit,
            });
        }
        if amount_owed < Decimal::ZERO {
            return Err(ValidationError::NegativeAmount {
                field: "amount_owed",
                amount: amount_owed,
            });
        }

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            credit_limit,
            amount_owed,
            expiration,
            created_at: now,
            updated_at: now,
        })
    }

    /// Remaining spendable credit: `max(0, credit_limit - amount_owed)`
    ///
    /// Owing more than the limit clamps the result to zero rather than
    /// going negative.
    pub fn limit_left(&self) -> Decimal {
        (self.credit_limit - self.amount_owed).max(Decimal::ZERO)
    }

    /// Charge an amount against the card
    ///
    /// Fails with [`ValidationError::LimitExceeded`] when the charge does
    /// not fit into the freshly computed [`CreditCard::limit_left`].
    pub fn charge(&mut self, amount: Decimal) -> Result<(), ValidationError> {
        if amount < Decimal::ZERO {
            return Err(ValidationError::NegativeAmount {
                field: "charge amount",
                amount,
            });
        }

        let available = self.limit_left();
        if amount > available {
            return Err(ValidationError::LimitExceeded {
                requested: amount,
                available,
            });
        }

        self.amount_owed += amount;
        self.touch();
        Ok(())
    }

    /// Pay an amount back onto the card
    ///
    /// Overpaying clears the debt; `amount_owed` never goes negative.
    pub fn repay(&mut self, amount: Decimal) -> Result<(), ValidationError> {
        if amount < Decimal::ZERO {
            return Err(ValidationError::NegativeAmount {
                field: "repayment amount",
                amount,
            });
        }

        self.amount_owed = (self.amount_owed - amount).max(Decimal::ZERO);
        self.touch();
        Ok(())
    }

    /// Whether the card is expired as of the given date
    pub fn is_expired(&self, on: NaiveDate) -> bool {
        self.expiration < on
    }

    /// Bump the updated_at timestamp
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
