//! Read models for presenting a user's payment methods
//!
//! Lookups return methods enriched with a snapshot of the resolved owner
//! entity, so callers get everything needed for display in one round trip.

use crate::entities::{Owner, User};
use crate::methods::record::PaymentMethod;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

/// Point-in-time view of a funding source
///
/// For credit cards the snapshot carries `limit_left` computed from the
/// stored fields and an `expired` flag evaluated against the current
/// date; neither is ever read back from storage.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OwnerSnapshot {
    BankAccount {
        id: Uuid,
        bank_name: String,
        swift_code: String,
        balance: Decimal,
    },
    CreditCard {
        id: Uuid,
        credit_limit: Decimal,
        amount_owed: Decimal,
        limit_left: Decimal,
        expiration: NaiveDate,
        expired: bool,
    },
}

impl From<&Owner> for OwnerSnapshot {
    fn from(owner: &Owner) -> Self {
        let id = owner.id();
        match owner {
            Owner::BankAccount(account) => OwnerSnapshot::BankAccount {
                id,
                bank_name: account.bank_name.clone(),
                swift_code: account.swift_code.clone(),
                balance: account.balance,
            },
            Owner::CreditCard(card) => OwnerSnapshot::CreditCard {
                id,
                credit_limit: card.credit_limit,
                amount_owed: card.amount_owed,
                limit_left: card.limit_left(),
                expiration: card.expiration,
                expired: card.is_expired(Utc::now().date_naive()),
            },
        }
    }
}

/// A payment method enriched with its resolved owner
#[derive(Debug, Clone, Serialize)]
pub struct PaymentMethodView {
    /// Id of the underlying payment method record
    pub method_id: Uuid,

    /// When the method was registered
    pub registered_at: DateTime<Utc>,

    /// Snapshot of the funding source backing the method
    pub owner: OwnerSnapshot,
}

impl PaymentMethodView {
    pub fn new(method: &PaymentMethod, owner: &Owner) -> Self {
        Self {
            method_id: method.id,
            registered_at: method.created_at,
            owner: OwnerSnapshot::from(owner),
        }
    }
}

/// All payment methods of one user, ready for display
#[derive(Debug, Clone, Serialize)]
pub struct UserPaymentMethods {
    pub user_id: Uuid,
    pub full_name: String,
    pub email: String,
    pub methods: Vec<PaymentMethodView>,
}

impl UserPaymentMethods {
    pub fn new(user: &User, methods: Vec<PaymentMethodView>) -> Self {
        Self {
            user_id: user.id,
            full_name: user.full_name(),
            email: user.email.clone(),
            methods,
        }
    }

    /// Views backed by bank accounts, in registration order
    pub fn bank_accounts(&self) -> impl Iterator<Item = &PaymentMethodView> {
        self.methods
            .iter()
            .filter(|view| matches!(view.owner, OwnerSnapshot::BankAccount { .. }))
    }

    /// Views backed by credit cards, in registration order
    pub fn credit_cards(&self) -> impl Iterator<Item = &PaymentMethodView> {
        self.methods
            .iter()
            .filter(|view| matches!(view.owner, OwnerSnapshot::CreditCard { .. }))
    }
}
