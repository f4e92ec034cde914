//! Bank account funding source

use crate::core::error::ValidationError;
use chrono::{DateTime, Utc};
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use uuid::Uuid;

/// A bank account that can back at most one payment method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankAccount {
    /// Unique identifier for this account
    pub id: Uuid,

    /// Current balance, never negative
    pub balance: Decimal,

    pub bank_name: String,

    /// SWIFT/BIC code of the holding bank (ISO 9362)
    pub swift_code: String,

    /// When this account was created
    pub created_at: DateTime<Utc>,

    /// When this account was last updated
    pub updated_at: DateTime<Utc>,
}

impl BankAccount {
    /// Create a new account, rejecting negative balances and malformed
    /// SWIFT codes
    pub fn new(
        balance: Decimal,
        bank_name: impl Into<String>,
        swift_code: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        if balance < Decimal::ZERO {
            return Err(ValidationError::NegativeAmount {
                field: "balance",
                amount: balance,
            });
        }

        let swift_code = swift_code.into();
        if !Self::is_valid_swift(&swift_code) {
            return Err(ValidationError::InvalidSwiftCode { code: swift_code });
        }

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            balance,
            bank_name: bank_name.into(),
            swift_code,
            created_at: now,
            updated_at: now,
        })
    }

    /// Check a SWIFT/BIC code against the ISO 9362 format
    ///
    /// Four letters of bank code, two letters of country code, two
    /// alphanumeric location characters, and an optional three-character
    /// branch code.
    pub fn is_valid_swift(code: &str) -> bool {
        static SWIFT_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = SWIFT_REGEX.get_or_init(|| {
            Regex::new(r"^[A-Z]{4}[A-Z]{2}[A-Z0-9]{2}(?:[A-Z0-9]{3})?$").unwrap()
        });
        regex.is_match(code)
    }
}
