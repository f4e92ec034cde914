//! # Paylink
//!
//! A payment method registry linking users to exactly one funding source
//! per method.
//!
//! ## Features
//!
//! - **Exclusive Owner References**: a payment method points at a bank
//!   account or a credit card, never both and never neither
//! - **Validated Candidates**: raw drafts carry the permissive wire shape;
//!   a pure validator turns them into well-formed references with specific
//!   rejection codes
//! - **Owner Uniqueness**: a funding source backs at most one payment
//!   method, enforced atomically under concurrent registration
//! - **Derived Credit Limits**: remaining credit is always computed from
//!   the stored limit and debt, never stored itself
//! - **Configurable Deletion Policy**: owner removal either cascades onto
//!   the backing method or is refused while a link exists
//! - **Explicit Storage Handles**: backends are passed where needed; there
//!   is no global context
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use paylink::prelude::*;
//! use std::sync::Arc;
//!
//! let store = Arc::new(InMemoryStore::new());
//! let registry = PaymentMethodRegistry::new(store.clone(), RegistryConfig::default());
//!
//! let user = store
//!     .insert_user(User::new("John", "Doe", "john.doe@example.com", "$argon2$..."))
//!     .await?;
//! let card = store
//!     .insert_credit_card(CreditCard::new(
//!         Decimal::from(5000),
//!         Decimal::ZERO,
//!         NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
//!     )?)
//!     .await?;
//!
//! let method = registry
//!     .register(PaymentMethodDraft::credit_card(user.id, card.id))
//!     .await?;
//!
//! // A second method on the same card is refused
//! let err = registry
//!     .register(PaymentMethodDraft::credit_card(user.id, card.id))
//!     .await
//!     .unwrap_err();
//! assert_eq!(err.error_code(), "OWNER_ALREADY_LINKED");
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod methods;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        error::{
            ConfigError, ConflictError, PaylinkError, PaylinkResult, StorageError, ValidationError,
        },
        owner::{OwnerKind, OwnerRef},
    };

    // === Entities ===
    pub use crate::entities::{BankAccount, CreditCard, Owner, User};

    // === Payment methods ===
    pub use crate::methods::{
        OwnerSnapshot, PaymentMethod, PaymentMethodDraft, PaymentMethodRegistry, PaymentMethodView,
        UserPaymentMethods, validate_owner_ref,
    };

    // === Storage ===
    pub use crate::storage::{InMemoryStore, MethodStore, OwnerStore, PaymentStore, UserStore};

    // === Config ===
    pub use crate::config::{DeletePolicy, RegistryConfig};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, NaiveDate, Utc};
    pub use rust_decimal::Decimal;
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}
