//! Stored payment method records

use crate::core::owner::{OwnerKind, OwnerRef};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A validated payment method linking a user to exactly one funding source
///
/// The owner reference is a sum type, so a stored record can never point
/// at both funding sources or at none. There is no API for re-pointing a
/// method at a different owner; delete and register again instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethod {
    /// Unique identifier for this method
    pub id: Uuid,

    /// The user this method belongs to
    pub user_id: Uuid,

    /// The single funding source backing this method
    pub owner: OwnerRef,

    /// When this method was registered
    pub created_at: DateTime<Utc>,

    /// When this method was last updated
    pub updated_at: DateTime<Utc>,
}

impl PaymentMethod {
    /// Create a new record with a fresh id and current timestamps
    pub fn new(user_id: Uuid, owner: OwnerRef) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            owner,
            created_at: now,
            updated_at: now,
        }
    }

    /// The kind tag of the backing owner
    pub fn kind(&self) -> OwnerKind {
        self.owner.kind()
    }

    /// Projection onto the `bank_account_id` column
    pub fn bank_account_id(&self) -> Option<Uuid> {
        self.owner.bank_account_id()
    }

    /// Projection onto the `credit_card_id` column
    pub fn credit_card_id(&self) -> Option<Uuid> {
        self.owner.credit_card_id()
    }
}
