//! Domain entities: users and the funding sources they can link

pub mod bank_account;
pub mod credit_card;
pub mod user;

pub use bank_account::BankAccount;
pub use credit_card::CreditCard;
pub use user::User;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A resolved funding source, as returned by owner lookups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Owner {
    BankAccount(BankAccount),
    CreditCard(CreditCard),
}

impl Owner {
    /// The id of the underlying entity
    pub fn id(&self) -> Uuid {
        match self {
            Owner::BankAccount(account) => account.id,
            Owner::CreditCard(card) => card.id,
        }
    }
}
