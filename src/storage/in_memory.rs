//! In-memory storage backend for testing and development

use crate::core::error::{ConflictError, PaylinkResult, StorageError, ValidationError};
use crate::core::owner::{OwnerKind, OwnerRef};
use crate::entities::{BankAccount, CreditCard, Owner, User};
use crate::methods::PaymentMethod;
use crate::storage::{MethodStore, OwnerLocks, OwnerStore, UserStore};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// Payment method rows plus the owner uniqueness index
///
/// Both maps sit behind one lock, so checking the index and inserting a
/// row is a single atomic step. The index is the storage-native owner
/// uniqueness constraint; it holds even for callers that bypass the
/// registry and insert directly.
#[derive(Default)]
struct MethodTable {
    rows: HashMap<Uuid, PaymentMethod>,
    by_owner: HashMap<OwnerRef, Uuid>,
}

/// In-memory store implementation
///
/// Useful for testing and development. Uses RwLock for thread-safe access.
/// Clones share the underlying maps and the per-owner lock handles.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
    accounts: Arc<RwLock<HashMap<Uuid, BankAccount>>>,
    cards: Arc<RwLock<HashMap<Uuid, CreditCard>>>,
    methods: Arc<RwLock<MethodTable>>,
    owner_locks: Arc<OwnerLocks>,
}

impl InMemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn insert_user(&self, user: User) -> PaylinkResult<User> {
        let mut users = self
            .users
            .write()
            .map_err(|_| StorageError::LockPoisoned { resource: "users" })?;

        users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn find_user(&self, id: &Uuid) -> PaylinkResult<Option<User>> {
        let users = self
            .users
            .read()
            .map_err(|_| StorageError::LockPoisoned { resource: "users" })?;

        Ok(users.get(id).cloned())
    }
}

#[async_trait]
impl OwnerStore for InMemoryStore {
    async fn insert_bank_account(&self, account: BankAccount) -> PaylinkResult<BankAccount> {
        let mut accounts = self
            .accounts
            .write()
            .map_err(|_| StorageError::LockPoisoned { resource: "bank accounts" })?;

        accounts.insert(account.id, account.clone());

        Ok(account)
    }

    async fn insert_credit_card(&self, card: CreditCard) -> PaylinkResult<CreditCard> {
        let mut cards = self
            .cards
            .write()
            .map_err(|_| StorageError::LockPoisoned { resource: "credit cards" })?;

        cards.insert(card.id, card.clone());

        Ok(card)
    }

    async fn find_owner(&self, kind: OwnerKind, id: &Uuid) -> PaylinkResult<Option<Owner>> {
        match kind {
            OwnerKind::BankAccount => {
                let accounts = self
                    .accounts
                    .read()
                    .map_err(|_| StorageError::LockPoisoned { resource: "bank accounts" })?;

                Ok(accounts.get(id).cloned().map(Owner::BankAccount))
            }
            OwnerKind::CreditCard => {
                let cards = self
                    .cards
                    .read()
                    .map_err(|_| StorageError::LockPoisoned { resource: "credit cards" })?;

                Ok(cards.get(id).cloned().map(Owner::CreditCard))
            }
        }
    }

    async fn update_credit_card(&self, card: CreditCard) -> PaylinkResult<CreditCard> {
        let mut cards = self
            .cards
            .write()
            .map_err(|_| StorageError::LockPoisoned { resource: "credit cards" })?;

        if !cards.contains_key(&card.id) {
            return Err(ValidationError::DanglingReference {
                kind: OwnerKind::CreditCard,
                id: card.id,
            }
            .into());
        }

        cards.insert(card.id, card.clone());

        Ok(card)
    }

    async fn delete_owner(&self, kind: OwnerKind, id: &Uuid) -> PaylinkResult<bool> {
        match kind {
            OwnerKind::BankAccount => {
                let mut accounts = self
                    .accounts
                    .write()
                    .map_err(|_| StorageError::LockPoisoned { resource: "bank accounts" })?;

                Ok(accounts.remove(id).is_some())
            }
            OwnerKind::CreditCard => {
                let mut cards = self
                    .cards
                    .write()
                    .map_err(|_| StorageError::LockPoisoned { resource: "credit cards" })?;

                Ok(cards.remove(id).is_some())
            }
        }
    }

    fn owner_gate(&self, owner: &OwnerRef) -> PaylinkResult<Arc<tokio::sync::Mutex<()>>> {
        self.owner_locks.handle(owner)
    }
}

#[async_trait]
impl MethodStore for InMemoryStore {
    async fn insert_method(&self, method: PaymentMethod) -> PaylinkResult<PaymentMethod> {
        let mut table = self
            .methods
            .write()
            .map_err(|_| StorageError::LockPoisoned { resource: "payment methods" })?;

        if let Some(existing) = table.by_owner.get(&method.owner) {
            return Err(ConflictError::OwnerAlreadyLinked {
                owner: method.owner,
                existing_method: *existing,
            }
            .into());
        }

        table.by_owner.insert(method.owner, method.id);
        table.rows.insert(method.id, method.clone());

        Ok(method)
    }

    async fn get_method(&self, id: &Uuid) -> PaylinkResult<Option<PaymentMethod>> {
        let table = self
            .methods
            .read()
            .map_err(|_| StorageError::LockPoisoned { resource: "payment methods" })?;

        Ok(table.rows.get(id).cloned())
    }

    async fn find_by_user(&self, user_id: &Uuid) -> PaylinkResult<Vec<PaymentMethod>> {
        let table = self
            .methods
            .read()
            .map_err(|_| StorageError::LockPoisoned { resource: "payment methods" })?;

        let mut methods: Vec<PaymentMethod> = table
            .rows
            .values()
            .filter(|method| &method.user_id == user_id)
            .cloned()
            .collect();

        // Registration order, for stable reports
        methods.sort_by_key(|method| method.created_at);

        Ok(methods)
    }

    async fn find_by_owner(&self, owner: &OwnerRef) -> PaylinkResult<Option<PaymentMethod>> {
        let table = self
            .methods
            .read()
            .map_err(|_| StorageError::LockPoisoned { resource: "payment methods" })?;

        Ok(table
            .by_owner
            .get(owner)
            .and_then(|id| table.rows.get(id))
            .cloned())
    }

    async fn delete_method(&self, id: &Uuid) -> PaylinkResult<bool> {
        let mut table = self
            .methods
            .write()
            .map_err(|_| StorageError::LockPoisoned { resource: "payment methods" })?;

        match table.rows.remove(id) {
            Some(method) => {
                table.by_owner.remove(&method.owner);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_by_owner(&self, owner: &OwnerRef) -> PaylinkResult<Option<Uuid>> {
        let mut table = self
            .methods
            .write()
            .map_err(|_| StorageError::LockPoisoned { resource: "payment methods" })?;

        match table.by_owner.remove(owner) {
            Some(method_id) => {
                table.rows.remove(&method_id);
                Ok(Some(method_id))
            }
            None => Ok(None),
        }
    }
}
