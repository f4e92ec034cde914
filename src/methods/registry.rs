//! Registration service enforcing the one-owner-one-method invariants

use crate::config::{DeletePolicy, RegistryConfig};
use crate::core::error::{ConflictError, PaylinkError, PaylinkResult, StorageError, ValidationError};
use crate::core::owner::{OwnerKind, OwnerRef};
use crate::methods::draft::PaymentMethodDraft;
use crate::methods::record::PaymentMethod;
use crate::methods::report::{PaymentMethodView, UserPaymentMethods};
use crate::methods::validate::validate_owner_ref;
use crate::storage::PaymentStore;
use futures::future::try_join_all;
use std::sync::Arc;
use uuid::Uuid;

/// Service coordinating payment method registration against a storage
/// backend
///
/// The registry owns no state of its own; rows and the per-owner critical
/// sections both live in the [`PaymentStore`] handle it is given.
/// Registries sharing a store therefore share those sections: a
/// registration and an owner removal issued through different registry
/// instances still serialize, and the store's uniqueness index backstops
/// it all for writers that bypass registries entirely.
pub struct PaymentMethodRegistry {
    store: Arc<dyn PaymentStore>,
    policy: DeletePolicy,
}

impl PaymentMethodRegistry {
    /// Create a registry over a storage handle
    pub fn new(store: Arc<dyn PaymentStore>, config: RegistryConfig) -> Self {
        Self {
            store,
            policy: config.on_owner_delete,
        }
    }

    /// The deletion policy this registry applies to owner removal
    pub fn policy(&self) -> DeletePolicy {
        self.policy
    }

    /// Register a payment method from a raw candidate
    ///
    /// Validates the draft's shape, resolves the user, then resolves the
    /// owner and inserts inside the owner's critical section. Rejections
    /// map to specific error variants:
    ///
    /// - shape violations: [`ValidationError::BothReferencesPresent`],
    ///   [`ValidationError::NoReferencePresent`],
    ///   [`ValidationError::TagMismatch`]
    /// - missing rows: [`ValidationError::UnknownUser`],
    ///   [`ValidationError::DanglingReference`]
    /// - uniqueness: [`ConflictError::OwnerAlreadyLinked`]
    pub async fn register(&self, draft: PaymentMethodDraft) -> PaylinkResult<PaymentMethod> {
        let owner = validate_owner_ref(&draft)?;

        if self.store.find_user(&draft.user_id).await?.is_none() {
            return Err(ValidationError::UnknownUser { id: draft.user_id }.into());
        }

        let lock = self.store.owner_gate(&owner)?;
        let _guard = lock.lock().await;

        if self
            .store
            .find_owner(owner.kind(), &owner.owner_id())
            .await?
            .is_none()
        {
            return Err(ValidationError::DanglingReference {
                kind: owner.kind(),
                id: owner.owner_id(),
            }
            .into());
        }

        let method = self
            .store
            .insert_method(PaymentMethod::new(draft.user_id, owner))
            .await?;

        tracing::info!(
            method_id = %method.id,
            user_id = %method.user_id,
            owner = %owner,
            "payment method registered"
        );

        Ok(method)
    }

    /// Remove a payment method, freeing its owner for relinking
    ///
    /// Returns whether a method existed. Removing an absent method is a
    /// no-op.
    pub async fn unregister(&self, method_id: &Uuid) -> PaylinkResult<bool> {
        let Some(method) = self.store.get_method(method_id).await? else {
            return Ok(false);
        };

        let lock = self.store.owner_gate(&method.owner)?;
        let _guard = lock.lock().await;

        let removed = self.store.delete_method(method_id).await?;
        if removed {
            tracing::info!(
                method_id = %method_id,
                owner = %method.owner,
                "payment method unregistered"
            );
        }

        Ok(removed)
    }

    /// Remove a funding source, applying the configured deletion policy
    ///
    /// Under [`DeletePolicy::Restrict`] a linked owner cannot be removed
    /// and the call fails with [`ConflictError::OwnerInUse`]. Under
    /// [`DeletePolicy::Cascade`] the backing payment method is deleted
    /// first, then the owner; a half-removed state is never observable
    /// because both steps run inside the owner's critical section.
    ///
    /// Returns whether an owner row existed.
    pub async fn remove_owner(&self, kind: OwnerKind, owner_id: &Uuid) -> PaylinkResult<bool> {
        let owner = OwnerRef::new(kind, *owner_id);
        let lock = self.store.owner_gate(&owner)?;
        let _guard = lock.lock().await;

        if let Some(method) = self.store.find_by_owner(&owner).await? {
            match self.policy {
                DeletePolicy::Restrict => {
                    return Err(ConflictError::OwnerInUse {
                        owner,
                        method_id: method.id,
                    }
                    .into());
                }
                DeletePolicy::Cascade => {
                    self.store.delete_by_owner(&owner).await?;
                    tracing::warn!(
                        owner = %owner,
                        method_id = %method.id,
                        "owner removal cascaded onto payment method"
                    );
                }
            }
        }

        let removed = self.store.delete_owner(kind, owner_id).await?;
        if removed {
            tracing::info!(owner = %owner, "owner removed");
        }

        Ok(removed)
    }

    /// All payment methods of a user, enriched with owner snapshots
    ///
    /// Returns `Ok(None)` for an unknown user. Owner lookups for the
    /// user's methods run concurrently; a method whose owner row has
    /// vanished surfaces as [`StorageError::MissingOwnerRow`].
    pub async fn user_report(&self, user_id: &Uuid) -> PaylinkResult<Option<UserPaymentMethods>> {
        let Some(user) = self.store.find_user(user_id).await? else {
            return Ok(None);
        };

        let methods = self.store.find_by_user(user_id).await?;

        let views = try_join_all(methods.iter().map(|method| async move {
            let owner = self
                .store
                .find_owner(method.kind(), &method.owner.owner_id())
                .await?
                .ok_or(StorageError::MissingOwnerRow {
                    method_id: method.id,
                    kind: method.kind(),
                    owner_id: method.owner.owner_id(),
                })?;

            Ok::<_, PaylinkError>(PaymentMethodView::new(method, &owner))
        }))
        .await?;

        tracing::debug!(user_id = %user_id, methods = views.len(), "built user report");

        Ok(Some(UserPaymentMethods::new(&user, views)))
    }
}
