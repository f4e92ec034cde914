//! Storage adapter traits and the in-memory reference backend
//!
//! Storage is always an explicit handle passed to the code that needs it;
//! there is no global registry or singleton context. The traits are split
//! by entity family so a backend can be swapped per family if needed,
//! while [`PaymentStore`] bundles them for callers that want all three.
//! Per-owner critical sections also belong to the store, so every consumer
//! of one backend serializes check-then-act sequences on the same handles.

pub mod in_memory;

pub use in_memory::InMemoryStore;

use crate::core::error::{PaylinkResult, StorageError};
use crate::core::owner::{OwnerKind, OwnerRef};
use crate::entities::{BankAccount, CreditCard, Owner, User};
use crate::methods::PaymentMethod;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Per-owner critical sections, owned by the storage backend
///
/// Operations that check an owner's state and then act on it (register,
/// unregister, owner removal) serialize on a per-owner async mutex so the
/// check and the action see the same state. The map lives with the store
/// rather than any one registry, which makes the sections shared across
/// every registry over the same backend. The outer std mutex only guards
/// the handle map and is never held across an await.
#[derive(Default)]
pub struct OwnerLocks {
    handles: Mutex<HashMap<OwnerRef, Arc<tokio::sync::Mutex<()>>>>,
}

impl OwnerLocks {
    /// Fetch (or create) the lock handle for an owner
    ///
    /// Handles nobody holds any more are pruned first, so the map only
    /// tracks owners with a live critical section plus the one requested.
    pub fn handle(&self, owner: &OwnerRef) -> PaylinkResult<Arc<tokio::sync::Mutex<()>>> {
        let mut handles = self
            .handles
            .lock()
            .map_err(|_| StorageError::LockPoisoned { resource: "owner locks" })?;

        handles.retain(|_, handle| Arc::strong_count(handle) > 1);

        Ok(Arc::clone(handles.entry(*owner).or_default()))
    }
}

/// Storage operations for users
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user
    async fn insert_user(&self, user: User) -> PaylinkResult<User>;

    /// Get a user by id
    async fn find_user(&self, id: &Uuid) -> PaylinkResult<Option<User>>;
}

/// Storage operations for funding source entities
#[async_trait]
pub trait OwnerStore: Send + Sync {
    /// Insert a new bank account
    async fn insert_bank_account(&self, account: BankAccount) -> PaylinkResult<BankAccount>;

    /// Insert a new credit card
    async fn insert_credit_card(&self, card: CreditCard) -> PaylinkResult<CreditCard>;

    /// Resolve an owner by kind and id
    async fn find_owner(&self, kind: OwnerKind, id: &Uuid) -> PaylinkResult<Option<Owner>>;

    /// Replace a stored credit card (after a charge or repayment)
    async fn update_credit_card(&self, card: CreditCard) -> PaylinkResult<CreditCard>;

    /// Delete an owner row
    ///
    /// Returns whether a row existed. Tolerant of absent rows; policy
    /// checks live above the store.
    async fn delete_owner(&self, kind: OwnerKind, id: &Uuid) -> PaylinkResult<bool>;

    /// The critical-section handle for one owner
    ///
    /// Check-then-act sequences on an owner lock this handle around the
    /// whole sequence. Handles come from the store, so they are shared by
    /// every registry over the same backend.
    fn owner_gate(&self, owner: &OwnerRef) -> PaylinkResult<Arc<tokio::sync::Mutex<()>>>;
}

/// Storage operations for payment method records
#[async_trait]
pub trait MethodStore: Send + Sync {
    /// Insert a new payment method
    ///
    /// Enforces owner uniqueness: fails with
    /// [`ConflictError::OwnerAlreadyLinked`](crate::core::ConflictError)
    /// when the owner already backs another method. The uniqueness check
    /// and the insert are atomic with respect to concurrent inserts.
    async fn insert_method(&self, method: PaymentMethod) -> PaylinkResult<PaymentMethod>;

    /// Get a payment method by id
    async fn get_method(&self, id: &Uuid) -> PaylinkResult<Option<PaymentMethod>>;

    /// All payment methods belonging to a user
    async fn find_by_user(&self, user_id: &Uuid) -> PaylinkResult<Vec<PaymentMethod>>;

    /// The method backed by an owner, if any
    ///
    /// At most one can exist; owner uniqueness is a storage invariant.
    async fn find_by_owner(&self, owner: &OwnerRef) -> PaylinkResult<Option<PaymentMethod>>;

    /// Delete a payment method by id
    ///
    /// Returns whether a row existed.
    async fn delete_method(&self, id: &Uuid) -> PaylinkResult<bool>;

    /// Delete the method backed by an owner, returning its id if one existed
    async fn delete_by_owner(&self, owner: &OwnerRef) -> PaylinkResult<Option<Uuid>>;
}

/// The full storage surface the registry needs
///
/// Blanket-implemented for anything that implements all three family
/// traits, so a backend never implements this directly.
pub trait PaymentStore: UserStore + OwnerStore + MethodStore {}

impl<T: UserStore + OwnerStore + MethodStore> PaymentStore for T {}
