//! Owner discriminant and exclusive owner references for payment methods

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// The kind of funding source a payment method points at
///
/// Mirrors the `type` discriminant column on the stored payment method row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnerKind {
    BankAccount,
    CreditCard,
}

impl OwnerKind {
    /// Stable string form, matching the serde representation
    pub fn as_str(&self) -> &'static str {
        match self {
            OwnerKind::BankAccount => "bank_account",
            OwnerKind::CreditCard => "credit_card",
        }
    }
}

impl fmt::Display for OwnerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated reference to exactly one funding source
///
/// A payment method row conceptually carries two nullable foreign key
/// columns (`bank_account_id`, `credit_card_id`) plus a kind tag. Storing
/// the reference as this enum makes the illegal column combinations
/// (both set, neither set, tag pointing at the wrong column)
/// unrepresentable after validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum OwnerRef {
    BankAccount(Uuid),
    CreditCard(Uuid),
}

impl OwnerRef {
    /// Build a reference from a kind tag and an owner id
    pub fn new(kind: OwnerKind, id: Uuid) -> Self {
        match kind {
            OwnerKind::BankAccount => OwnerRef::BankAccount(id),
            OwnerKind::CreditCard => OwnerRef::CreditCard(id),
        }
    }

    /// The kind tag of the referenced owner
    pub fn kind(&self) -> OwnerKind {
        match self {
            OwnerRef::BankAccount(_) => OwnerKind::BankAccount,
            OwnerRef::CreditCard(_) => OwnerKind::CreditCard,
        }
    }

    /// The id of the referenced owner, whichever kind it is
    pub fn owner_id(&self) -> Uuid {
        match self {
            OwnerRef::BankAccount(id) | OwnerRef::CreditCard(id) => *id,
        }
    }

    /// Projection onto the `bank_account_id` column
    pub fn bank_account_id(&self) -> Option<Uuid> {
        match self {
            OwnerRef::BankAccount(id) => Some(*id),
            OwnerRef::CreditCard(_) => None,
        }
    }

    /// Projection onto the `credit_card_id` column
    pub fn credit_card_id(&self) -> Option<Uuid> {
        match self {
            OwnerRef::BankAccount(_) => None,
            OwnerRef::CreditCard(id) => Some(*id),
        }
    }
}

impl fmt::Display for OwnerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind(), self.owner_id())
    }
}
