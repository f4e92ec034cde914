//! Typed error handling for the paylink crate
//!
//! Every rejection carries a specific variant so callers can branch on the
//! cause rather than string-matching a generic error.
//!
//! # Error Categories
//!
//! - [`ValidationError`]: a candidate or entity failed a structural rule
//! - [`ConflictError`]: an operation collided with an existing link
//! - [`StorageError`]: the storage backend itself failed
//! - [`ConfigError`]: configuration could not be loaded or parsed
//!
//! # Example
//!
//! ```rust,ignore
//! use paylink::prelude::*;
//!
//! match registry.register(draft).await {
//!     Ok(method) => println!("registered {}", method.id),
//!     Err(PaylinkError::Conflict(ConflictError::OwnerAlreadyLinked { owner, .. })) => {
//!         println!("{} already backs another method", owner);
//!     }
//!     Err(e) => eprintln!("rejected: {} ({})", e, e.error_code()),
//! }
//! ```

use crate::core::owner::{OwnerKind, OwnerRef};
use rust_decimal::Decimal;
use uuid::Uuid;

/// The main error type for the paylink crate
///
/// Each variant wraps a more specific error type for that category.
#[derive(Debug, thiserror::Error)]
pub enum PaylinkError {
    /// A candidate or entity failed validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// An operation collided with an existing link
    #[error(transparent)]
    Conflict(#[from] ConflictError),

    /// The storage backend failed
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Configuration could not be loaded or parsed
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl PaylinkError {
    /// Get the stable error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            PaylinkError::Validation(e) => e.error_code(),
            PaylinkError::Conflict(e) => e.error_code(),
            PaylinkError::Storage(e) => e.error_code(),
            PaylinkError::Config(e) => e.error_code(),
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors raised when a candidate payment method or an entity field
/// violates a structural rule
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// The candidate references both a bank account and a credit card
    #[error("payment method for user '{user_id}' references both a bank account and a credit card")]
    BothReferencesPresent { user_id: Uuid },

    /// The candidate declares a kind but references no owner at all
    #[error("payment method for user '{user_id}' declares kind '{kind}' but references no owner")]
    NoReferencePresent { user_id: Uuid, kind: OwnerKind },

    /// The declared kind does not match the column that is actually set
    #[error(
        "payment method for user '{user_id}' declares kind '{declared}' but references a {actual}"
    )]
    TagMismatch {
        user_id: Uuid,
        declared: OwnerKind,
        actual: OwnerKind,
    },

    /// The referenced owner entity does not exist
    #[error("{kind} with id '{id}' does not exist")]
    DanglingReference { kind: OwnerKind, id: Uuid },

    /// The user the method would belong to does not exist
    #[error("user with id '{id}' does not exist")]
    UnknownUser { id: Uuid },

    /// A monetary field that must be non-negative was negative
    #[error("{field} must not be negative (got {amount})")]
    NegativeAmount {
        field: &'static str,
        amount: Decimal,
    },

    /// A SWIFT/BIC code did not match the ISO 9362 format
    #[error("'{code}' is not a valid SWIFT code")]
    InvalidSwiftCode { code: String },

    /// A charge would push a card past its available credit
    #[error("charge of {requested} exceeds available credit of {available}")]
    LimitExceeded {
        requested: Decimal,
        available: Decimal,
    },
}

impl ValidationError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::BothReferencesPresent { .. } => "BOTH_REFERENCES_PRESENT",
            ValidationError::NoReferencePresent { .. } => "NO_REFERENCE_PRESENT",
            ValidationError::TagMismatch { .. } => "REFERENCE_TAG_MISMATCH",
            ValidationError::DanglingReference { .. } => "DANGLING_REFERENCE",
            ValidationError::UnknownUser { .. } => "UNKNOWN_USER",
            ValidationError::NegativeAmount { .. } => "NEGATIVE_AMOUNT",
            ValidationError::InvalidSwiftCode { .. } => "INVALID_SWIFT_CODE",
            ValidationError::LimitExceeded { .. } => "CREDIT_LIMIT_EXCEEDED",
        }
    }
}

// =============================================================================
// Conflict Errors
// =============================================================================

/// Errors raised when an operation collides with an existing link
#[derive(Debug, thiserror::Error)]
pub enum ConflictError {
    /// The owner already backs another payment method
    #[error("{owner} already backs payment method '{existing_method}'")]
    OwnerAlreadyLinked {
        owner: OwnerRef,
        existing_method: Uuid,
    },

    /// The owner cannot be removed while a payment method points at it
    #[error("{owner} is still in use by payment method '{method_id}'")]
    OwnerInUse { owner: OwnerRef, method_id: Uuid },
}

impl ConflictError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ConflictError::OwnerAlreadyLinked { .. } => "OWNER_ALREADY_LINKED",
            ConflictError::OwnerInUse { .. } => "OWNER_IN_USE",
        }
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors raised by the storage backend itself
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A lock guarding a table was poisoned by a panicking writer
    #[error("failed to acquire {resource} lock")]
    LockPoisoned { resource: &'static str },

    /// A stored payment method points at an owner row that is gone
    #[error("payment method '{method_id}' references missing {kind} '{owner_id}'")]
    MissingOwnerRow {
        method_id: Uuid,
        kind: OwnerKind,
        owner_id: Uuid,
    },
}

impl StorageError {
    pub fn error_code(&self) -> &'static str {
        match self {
            StorageError::LockPoisoned { .. } => "LOCK_POISONED",
            StorageError::MissingOwnerRow { .. } => "MISSING_OWNER_ROW",
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors raised while loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read a configuration file
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration content
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

impl ConfigError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ConfigError::Io { .. } => "CONFIG_IO_ERROR",
            ConfigError::Parse(_) => "CONFIG_PARSE_ERROR",
        }
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for paylink operations
pub type PaylinkResult<T> = Result<T, PaylinkError>;

// =============================================================================
// Tests
// =============================================================================
