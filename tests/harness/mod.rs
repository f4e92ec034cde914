//! Shared test harness for registry and storage testing
//!
//! Provides seeded fixtures (users, funding sources, registries over a
//! shared in-memory store) and assertion helpers.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! mod harness;
//! use harness::*;
//! ```

#![allow(dead_code)]

use chrono::NaiveDate;
use paylink::prelude::*;
use rust_decimal::Decimal;
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Registry construction
// ---------------------------------------------------------------------------

/// A fresh registry over a fresh store, with the given deletion policy.
pub fn fresh_registry(policy: DeletePolicy) -> (PaymentMethodRegistry, Arc<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::new());
    let registry = PaymentMethodRegistry::new(
        store.clone(),
        RegistryConfig {
            on_owner_delete: policy,
        },
    );
    (registry, store)
}

// ---------------------------------------------------------------------------
// Entity fixtures
// ---------------------------------------------------------------------------

/// Create a user with deterministic sample fields.
pub fn sample_user(first_name: &str, last_name: &str) -> User {
    let email = format!(
        "{}.{}@example.com",
        first_name.to_lowercase(),
        last_name.to_lowercase()
    );
    User::new(first_name, last_name, email, "$argon2$test")
}

/// Create a bank account with a valid SWIFT code.
pub fn sample_account(balance: i64, bank_name: &str) -> BankAccount {
    BankAccount::new(Decimal::from(balance), bank_name, "BKAAUS33").expect("valid test account")
}

/// Create a credit card expiring mid-2024.
pub fn sample_card(credit_limit: i64, amount_owed: i64) -> CreditCard {
    CreditCard::new(
        Decimal::from(credit_limit),
        Decimal::from(amount_owed),
        NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
    )
    .expect("valid test card")
}

// ---------------------------------------------------------------------------
// Seeding helpers
// ---------------------------------------------------------------------------

/// Insert a user with sample fields and return it.
pub async fn seed_user(store: &Arc<InMemoryStore>) -> User {
    store
        .insert_user(sample_user("John", "Doe"))
        .await
        .expect("seed user")
}

/// Insert a bank account and return it.
pub async fn seed_account(store: &Arc<InMemoryStore>) -> BankAccount {
    store
        .insert_bank_account(sample_account(10000, "Bank A"))
        .await
        .expect("seed account")
}

/// Insert a credit card and return it.
pub async fn seed_card(store: &Arc<InMemoryStore>) -> CreditCard {
    store
        .insert_credit_card(sample_card(5000, 0))
        .await
        .expect("seed card")
}

// ---------------------------------------------------------------------------
// Assertion helpers
// ---------------------------------------------------------------------------

/// Assert that a result failed with the expected error code.
pub fn assert_error_code<T: std::fmt::Debug>(result: PaylinkResult<T>, expected: &str) {
    match result {
        Err(e) => assert_eq!(
            e.error_code(),
            expected,
            "expected {} but got {}: {}",
            expected,
            e.error_code(),
            e
        ),
        Ok(value) => panic!("expected {} error, got Ok({:?})", expected, value),
    }
}

/// Assert that a user's stored methods match the expected count.
pub async fn assert_method_count(store: &Arc<InMemoryStore>, user_id: &Uuid, expected: usize) {
    let methods = store.find_by_user(user_id).await.expect("find_by_user");
    assert_eq!(
        methods.len(),
        expected,
        "expected {} methods for user {}, got {}",
        expected,
        user_id,
        methods.len()
    );
}
