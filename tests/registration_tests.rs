//! Integration tests for payment method registration and reporting
//!
//! Covers the validator contract end to end, user/owner resolution,
//! owner uniqueness, and the enriched per-user report.

mod harness;

use harness::*;
use paylink::prelude::*;
use rust_decimal::Decimal;

// ===========================================================================
// Registration: happy paths
// ===========================================================================

#[tokio::test]
async fn test_register_bank_account_method() {
    let (registry, store) = fresh_registry(DeletePolicy::Restrict);
    let user = seed_user(&store).await;
    let account = seed_account(&store).await;

    let method = registry
        .register(PaymentMethodDraft::bank_account(user.id, account.id))
        .await
        .unwrap();

    assert_eq!(method.user_id, user.id);
    assert_eq!(method.kind(), OwnerKind::BankAccount);
    assert_eq!(method.bank_account_id(), Some(account.id));
    assert_eq!(method.credit_card_id(), None);

    // The record is persisted and indexed
    let stored = store.get_method(&method.id).await.unwrap();
    assert_eq!(stored, Some(method.clone()));
    let by_owner = store
        .find_by_owner(&OwnerRef::BankAccount(account.id))
        .await
        .unwrap();
    assert_eq!(by_owner.map(|m| m.id), Some(method.id));
}

#[tokio::test]
async fn test_register_credit_card_method() {
    let (registry, store) = fresh_registry(DeletePolicy::Restrict);
    let user = seed_user(&store).await;
    let card = seed_card(&store).await;

    let method = registry
        .register(PaymentMethodDraft::credit_card(user.id, card.id))
        .await
        .unwrap();

    assert_eq!(method.kind(), OwnerKind::CreditCard);
    assert_eq!(method.credit_card_id(), Some(card.id));
    assert_eq!(method.bank_account_id(), None);
}

#[tokio::test]
async fn test_user_can_hold_many_methods() {
    let (registry, store) = fresh_registry(DeletePolicy::Restrict);
    let user = seed_user(&store).await;
    let account = seed_account(&store).await;
    let card = seed_card(&store).await;

    registry
        .register(PaymentMethodDraft::bank_account(user.id, account.id))
        .await
        .unwrap();
    registry
        .register(PaymentMethodDraft::credit_card(user.id, card.id))
        .await
        .unwrap();

    assert_method_count(&store, &user.id, 2).await;
}

// ===========================================================================
// Registration: shape violations
// ===========================================================================

#[tokio::test]
async fn test_draft_with_both_references_rejected() {
    let (registry, store) = fresh_registry(DeletePolicy::Restrict);
    let user = seed_user(&store).await;
    let account = seed_account(&store).await;
    let card = seed_card(&store).await;

    let draft = PaymentMethodDraft {
        user_id: user.id,
        kind: OwnerKind::CreditCard,
        bank_account_id: Some(account.id),
        credit_card_id: Some(card.id),
    };

    assert_error_code(registry.register(draft).await, "BOTH_REFERENCES_PRESENT");
    assert_method_count(&store, &user.id, 0).await;
}

#[tokio::test]
async fn test_draft_with_no_reference_rejected() {
    let (registry, store) = fresh_registry(DeletePolicy::Restrict);
    let user = seed_user(&store).await;

    let draft = PaymentMethodDraft {
        user_id: user.id,
        kind: OwnerKind::BankAccount,
        bank_account_id: None,
        credit_card_id: None,
    };

    assert_error_code(registry.register(draft).await, "NO_REFERENCE_PRESENT");
}

#[tokio::test]
async fn test_draft_with_mismatched_tag_rejected() {
    let (registry, store) = fresh_registry(DeletePolicy::Restrict);
    let user = seed_user(&store).await;
    let card = seed_card(&store).await;

    // Tag says bank account, reference is a credit card
    let draft = PaymentMethodDraft {
        user_id: user.id,
        kind: OwnerKind::BankAccount,
        bank_account_id: None,
        credit_card_id: Some(card.id),
    };

    assert_error_code(registry.register(draft).await, "REFERENCE_TAG_MISMATCH");
}

// ===========================================================================
// Registration: resolution failures
// ===========================================================================

#[tokio::test]
async fn test_unknown_user_rejected() {
    let (registry, store) = fresh_registry(DeletePolicy::Restrict);
    let account = seed_account(&store).await;

    assert_error_code(
        registry
            .register(PaymentMethodDraft::bank_account(Uuid::new_v4(), account.id))
            .await,
        "UNKNOWN_USER",
    );
}

#[tokio::test]
async fn test_dangling_account_reference_rejected() {
    let (registry, store) = fresh_registry(DeletePolicy::Restrict);
    let user = seed_user(&store).await;

    assert_error_code(
        registry
            .register(PaymentMethodDraft::bank_account(user.id, Uuid::new_v4()))
            .await,
        "DANGLING_REFERENCE",
    );
}

#[tokio::test]
async fn test_dangling_card_reference_rejected() {
    let (registry, store) = fresh_registry(DeletePolicy::Restrict);
    let user = seed_user(&store).await;

    assert_error_code(
        registry
            .register(PaymentMethodDraft::credit_card(user.id, Uuid::new_v4()))
            .await,
        "DANGLING_REFERENCE",
    );
}

#[tokio::test]
async fn test_wrong_kind_for_existing_owner_rejected() {
    // An account id presented as a credit card must not resolve
    let (registry, store) = fresh_registry(DeletePolicy::Restrict);
    let user = seed_user(&store).await;
    let account = seed_account(&store).await;

    assert_error_code(
        registry
            .register(PaymentMethodDraft::credit_card(user.id, account.id))
            .await,
        "DANGLING_REFERENCE",
    );
}

// ===========================================================================
// Registration: owner uniqueness
// ===========================================================================

#[tokio::test]
async fn test_owner_cannot_back_two_methods_for_same_user() {
    let (registry, store) = fresh_registry(DeletePolicy::Restrict);
    let user = seed_user(&store).await;
    let card = seed_card(&store).await;

    registry
        .register(PaymentMethodDraft::credit_card(user.id, card.id))
        .await
        .unwrap();

    assert_error_code(
        registry
            .register(PaymentMethodDraft::credit_card(user.id, card.id))
            .await,
        "OWNER_ALREADY_LINKED",
    );
    assert_method_count(&store, &user.id, 1).await;
}

#[tokio::test]
async fn test_owner_cannot_back_methods_for_two_users() {
    let (registry, store) = fresh_registry(DeletePolicy::Restrict);
    let john = store.insert_user(sample_user("John", "Doe")).await.unwrap();
    let jane = store
        .insert_user(sample_user("Jane", "Smith"))
        .await
        .unwrap();
    let card = seed_card(&store).await;

    registry
        .register(PaymentMethodDraft::credit_card(john.id, card.id))
        .await
        .unwrap();

    assert_error_code(
        registry
            .register(PaymentMethodDraft::credit_card(jane.id, card.id))
            .await,
        "OWNER_ALREADY_LINKED",
    );
}

#[tokio::test]
async fn test_unregister_frees_owner() {
    let (registry, store) = fresh_registry(DeletePolicy::Restrict);
    let user = seed_user(&store).await;
    let card = seed_card(&store).await;

    let method = registry
        .register(PaymentMethodDraft::credit_card(user.id, card.id))
        .await
        .unwrap();

    assert!(registry.unregister(&method.id).await.unwrap());
    // A second unregister is a tolerated no-op
    assert!(!registry.unregister(&method.id).await.unwrap());

    // The card can back a method again
    let relinked = registry
        .register(PaymentMethodDraft::credit_card(user.id, card.id))
        .await;
    assert!(relinked.is_ok());
}

// ===========================================================================
// Reports
// ===========================================================================

#[tokio::test]
async fn test_report_for_unknown_user_is_none() {
    let (registry, _store) = fresh_registry(DeletePolicy::Restrict);

    let report = registry.user_report(&Uuid::new_v4()).await.unwrap();
    assert!(report.is_none());
}

#[tokio::test]
async fn test_report_for_user_without_methods_is_empty() {
    let (registry, store) = fresh_registry(DeletePolicy::Restrict);
    let user = seed_user(&store).await;

    let report = registry.user_report(&user.id).await.unwrap().unwrap();

    assert_eq!(report.user_id, user.id);
    assert_eq!(report.full_name, "John Doe");
    assert!(report.methods.is_empty());
}

#[tokio::test]
async fn test_report_snapshots_carry_derived_limits() {
    let (registry, store) = fresh_registry(DeletePolicy::Restrict);
    let user = seed_user(&store).await;

    // limit/owed pairs and their expected remaining credit
    let cases = [(5000, 0, 5000), (2000, 150, 1850), (1000, 1500, 0)];

    for (limit, owed, _) in cases {
        let card = store
            .insert_credit_card(sample_card(limit, owed))
            .await
            .unwrap();
        registry
            .register(PaymentMethodDraft::credit_card(user.id, card.id))
            .await
            .unwrap();
    }

    let report = registry.user_report(&user.id).await.unwrap().unwrap();
    assert_eq!(report.methods.len(), cases.len());

    let mut seen: Vec<(Decimal, Decimal, Decimal)> = report
        .credit_cards()
        .map(|view| match &view.owner {
            OwnerSnapshot::CreditCard {
                credit_limit,
                amount_owed,
                limit_left,
                ..
            } => (*credit_limit, *amount_owed, *limit_left),
            other => panic!("expected credit card snapshot, got {:?}", other),
        })
        .collect();
    seen.sort();

    let mut expected: Vec<(Decimal, Decimal, Decimal)> = cases
        .iter()
        .map(|(limit, owed, left)| {
            (Decimal::from(*limit), Decimal::from(*owed), Decimal::from(*left))
        })
        .collect();
    expected.sort();

    assert_eq!(seen, expected);
}

#[tokio::test]
async fn test_report_includes_account_details() {
    let (registry, store) = fresh_registry(DeletePolicy::Restrict);
    let user = seed_user(&store).await;
    let account = seed_account(&store).await;

    registry
        .register(PaymentMethodDraft::bank_account(user.id, account.id))
        .await
        .unwrap();

    let report = registry.user_report(&user.id).await.unwrap().unwrap();
    let view = report.bank_accounts().next().expect("one account view");

    match &view.owner {
        OwnerSnapshot::BankAccount {
            id,
            bank_name,
            swift_code,
            balance,
        } => {
            assert_eq!(*id, account.id);
            assert_eq!(bank_name, "Bank A");
            assert_eq!(swift_code, "BKAAUS33");
            assert_eq!(*balance, Decimal::from(10000));
        }
        other => panic!("expected bank account snapshot, got {:?}", other),
    }
}

#[tokio::test]
async fn test_report_reads_do_not_change_state() {
    let (registry, store) = fresh_registry(DeletePolicy::Restrict);
    let user = seed_user(&store).await;
    let card = seed_card(&store).await;

    registry
        .register(PaymentMethodDraft::credit_card(user.id, card.id))
        .await
        .unwrap();

    let first = registry.user_report(&user.id).await.unwrap().unwrap();
    let second = registry.user_report(&user.id).await.unwrap().unwrap();

    assert_eq!(first.methods.len(), second.methods.len());
    assert_eq!(
        first.methods[0].method_id,
        second.methods[0].method_id
    );

    // The derived limit is recomputed per read, identical on every read
    let limit_of = |report: &UserPaymentMethods| match &report.methods[0].owner {
        OwnerSnapshot::CreditCard { limit_left, .. } => *limit_left,
        other => panic!("expected credit card snapshot, got {:?}", other),
    };
    assert_eq!(limit_of(&first), Decimal::from(5000));
    assert_eq!(limit_of(&first), limit_of(&second));

    assert_method_count(&store, &user.id, 1).await;
}

#[tokio::test]
async fn test_charge_is_visible_in_next_report() {
    let (registry, store) = fresh_registry(DeletePolicy::Restrict);
    let user = seed_user(&store).await;
    let card = seed_card(&store).await; // limit 5000, owed 0

    registry
        .register(PaymentMethodDraft::credit_card(user.id, card.id))
        .await
        .unwrap();

    let mut charged = card.clone();
    charged.charge(Decimal::from(4000)).unwrap();
    store.update_credit_card(charged).await.unwrap();

    let report = registry.user_report(&user.id).await.unwrap().unwrap();
    match &report.methods[0].owner {
        OwnerSnapshot::CreditCard { limit_left, .. } => {
            assert_eq!(*limit_left, Decimal::from(1000));
        }
        other => panic!("expected credit card snapshot, got {:?}", other),
    }
}
