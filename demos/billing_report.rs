//! Billing Report Example
//!
//! Seeds the sample billing data and walks through the registry:
//! - Registering payment methods backed by cards and accounts
//! - Printing per-user billing reports with derived credit limits
//! - Rejections: malformed drafts, double-linked owners, protected owners
//! - Cascading owner removal under a YAML-configured policy

use anyhow::Result;
use paylink::prelude::*;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let store = Arc::new(InMemoryStore::new());
    let registry = PaymentMethodRegistry::new(store.clone(), RegistryConfig::default());

    // -- Seed users and funding sources -----------------------------------

    let john = store
        .insert_user(User::new("John", "Doe", "john.doe@example.com", "$argon2$john"))
        .await?;
    let jane = store
        .insert_user(User::new("Jane", "Smith", "jane.smith@example.com", "$argon2$jane"))
        .await?;

    let john_card = store
        .insert_credit_card(CreditCard::new(
            Decimal::from(5000),
            Decimal::ZERO,
            NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
        )?)
        .await?;
    let jane_card = store
        .insert_credit_card(CreditCard::new(
            Decimal::from(2000),
            Decimal::from(150),
            NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
        )?)
        .await?;

    let john_account = store
        .insert_bank_account(BankAccount::new(Decimal::from(10000), "Bank A", "BKAAUS33")?)
        .await?;
    let jane_account = store
        .insert_bank_account(BankAccount::new(Decimal::from(5000), "Bank B", "BKBBGB22")?)
        .await?;

    // -- Register payment methods -----------------------------------------

    registry
        .register(PaymentMethodDraft::credit_card(john.id, john_card.id))
        .await?;
    registry
        .register(PaymentMethodDraft::bank_account(john.id, john_account.id))
        .await?;
    registry
        .register(PaymentMethodDraft::credit_card(jane.id, jane_card.id))
        .await?;
    registry
        .register(PaymentMethodDraft::bank_account(jane.id, jane_account.id))
        .await?;

    println!("🏦 Database seeded successfully!\n");

    print_user_report(&registry, &john.id).await?;
    print_user_report(&registry, &jane.id).await?;
    print_user_report(&registry, &Uuid::new_v4()).await?;

    // -- Rejected operations ----------------------------------------------

    println!("🚫 Rejected operations:");

    // A draft referencing both funding sources at once
    let contradictory = PaymentMethodDraft {
        user_id: john.id,
        kind: OwnerKind::CreditCard,
        bank_account_id: Some(john_account.id),
        credit_card_id: Some(john_card.id),
    };
    if let Err(e) = registry.register(contradictory).await {
        println!("  ✗ [{}] {}", e.error_code(), e);
    }

    // Jane trying to link John's card, which already backs a method
    if let Err(e) = registry
        .register(PaymentMethodDraft::credit_card(jane.id, john_card.id))
        .await
    {
        println!("  ✗ [{}] {}", e.error_code(), e);
    }

    // Removing a linked account under the default restrict policy
    if let Err(e) = registry
        .remove_owner(OwnerKind::BankAccount, &john_account.id)
        .await
    {
        println!("  ✗ [{}] {}", e.error_code(), e);
    }

    // A charge past the card's remaining credit
    let mut card = john_card.clone();
    card.charge(Decimal::from(4000))?;
    store.update_credit_card(card.clone()).await?;
    println!("\n💳 Charged 4000.00 to John's card");
    if card.is_expired(Utc::now().date_naive()) {
        println!("  ⚠ Card lapsed {}", card.expiration.format("%Y-%m"));
    }
    if let Err(e) = card.charge(Decimal::from(2000)) {
        println!("  ✗ [{}] {}\n", e.error_code(), e);
    }

    print_user_report(&registry, &john.id).await?;

    // -- Cascading owner removal ------------------------------------------

    let cascading = PaymentMethodRegistry::new(
        store.clone(),
        RegistryConfig::from_yaml_str("on_owner_delete: cascade")?,
    );

    println!("🗑  Removing Jane's bank account under the cascade policy");
    cascading
        .remove_owner(OwnerKind::BankAccount, &jane_account.id)
        .await?;

    print_user_report(&registry, &jane.id).await?;

    Ok(())
}

/// Print a user's payment methods in the classic console layout
async fn print_user_report(registry: &PaymentMethodRegistry, user_id: &Uuid) -> Result<()> {
    let Some(report) = registry.user_report(user_id).await? else {
        println!("User with ID {} not found!\n", user_id);
        return Ok(());
    };

    println!("User: {}", report.full_name);

    println!("Bank Accounts:");
    for view in report.bank_accounts() {
        if let OwnerSnapshot::BankAccount {
            id,
            balance,
            bank_name,
            swift_code,
        } = &view.owner
        {
            println!("- ID: {}", id);
            println!("  - Balance: {:.2}", balance);
            println!("  - Bank: {}", bank_name);
            println!("  - SWIFT: {}", swift_code);
        }
    }

    println!("Credit Cards:");
    for view in report.credit_cards() {
        if let OwnerSnapshot::CreditCard {
            id,
            credit_limit,
            amount_owed,
            limit_left,
            expiration,
            expired,
        } = &view.owner
        {
            let status = if *expired { " (expired)" } else { "" };
            println!("- ID: {}", id);
            println!("  - Limit: {:.2}", credit_limit);
            println!("  - Money Owed: {:.2}", amount_owed);
            println!("  - Limit Left: {:.2}", limit_left);
            println!("  - Expiration Date: {}{}", expiration.format("%Y-%m"), status);
        }
    }

    println!();
    Ok(())
}
