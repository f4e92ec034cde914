//! Core module containing the owner model and error types

pub mod error;
pub mod owner;

pub use error::{
    ConfigError, ConflictError, PaylinkError, PaylinkResult, StorageError, ValidationError,
};
pub use owner::{OwnerKind, OwnerRef};
