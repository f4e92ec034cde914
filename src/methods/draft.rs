//! Unvalidated payment method candidates as they arrive on the wire

use crate::core::owner::OwnerKind;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A candidate payment method before validation
///
/// This is the raw column shape: a kind tag plus two independently
/// nullable owner references. Nothing prevents a draft from being
/// contradictory; [`validate_owner_ref`](crate::methods::validate_owner_ref)
/// is the only way to turn one into a usable
/// [`OwnerRef`](crate::core::OwnerRef).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethodDraft {
    /// The user this method would belong to
    pub user_id: Uuid,

    /// Which kind of owner the draft claims to reference
    pub kind: OwnerKind,

    /// Bank account reference, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_account_id: Option<Uuid>,

    /// Credit card reference, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_card_id: Option<Uuid>,
}

impl PaymentMethodDraft {
    /// A well-formed draft referencing a bank account
    pub fn bank_account(user_id: Uuid, account_id: Uuid) -> Self {
        Self {
            user_id,
            kind: OwnerKind::BankAccount,
            bank_account_id: Some(account_id),
            credit_card_id: None,
        }
    }

    /// A well-formed draft referencing a credit card
    pub fn credit_card(user_id: Uuid, card_id: Uuid) -> Self {
        Self {
            user_id,
            kind: OwnerKind::CreditCard,
            bank_account_id: None,
            credit_card_id: Some(card_id),
        }
    }
}
