//! Structural validation of payment method candidates

use crate::core::error::ValidationError;
use crate::core::owner::{OwnerKind, OwnerRef};
use crate::methods::draft::PaymentMethodDraft;

/// Check that a draft references exactly one owner and that the declared
/// kind matches the column that is set
///
/// This is a pure function over the draft's columns; it never touches
/// storage. Existence of the referenced user and owner is checked later,
/// during registration.
///
/// | kind tag     | bank_account_id | credit_card_id | result                  |
/// |--------------|-----------------|----------------|-------------------------|
/// | any          | set             | set            | `BothReferencesPresent` |
/// | any          | unset           | unset          | `NoReferencePresent`    |
/// | bank_account | set             | unset          | ok                      |
/// | bank_account | unset           | set            | `TagMismatch`           |
/// | credit_card  | unset           | set            | ok                      |
/// | credit_card  | set             | unset          | `TagMismatch`           |
pub fn validate_owner_ref(draft: &PaymentMethodDraft) -> Result<OwnerRef, ValidationError> {
    match (draft.bank_account_id, draft.credit_card_id) {
        (Some(_), Some(_)) => Err(ValidationError::BothReferencesPresent {
            user_id: draft.user_id,
        }),
        (None, None) => Err(ValidationError::NoReferencePresent {
            user_id: draft.user_id,
            kind: draft.kind,
        }),
        (Some(account_id), None) => match draft.kind {
            OwnerKind::BankAccount => Ok(OwnerRef::BankAccount(account_id)),
            OwnerKind::CreditCard => Err(ValidationError::TagMismatch {
                user_id: draft.user_id,
                declared: OwnerKind::CreditCard,
                actual: OwnerKind::BankAccount,
            }),
        },
        (None, Some(card_id)) => match draft.kind {
            OwnerKind::CreditCard => Ok(OwnerRef::CreditCard(card_id)),
            OwnerKind::BankAccount => Err(ValidationError::TagMismatch {
                user_id: draft.user_id,
                declared: OwnerKind::BankAccount,
                actual: OwnerKind::CreditCard,
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn draft(
        kind: OwnerKind,
        bank_account_id: Option<Uuid>,
        credit_card_id: Option<Uuid>,
    ) -> PaymentMethodDraft {
        PaymentMethodDraft {
            user_id: Uuid::new_v4(),
            kind,
            bank_account_id,
            credit_card_id,
        }
    }

    #[test]
    fn test_valid_bank_account_draft() {
        let account_id = Uuid::new_v4();
        let owner =
            validate_owner_ref(&draft(OwnerKind::BankAccount, Some(account_id), None)).unwrap();

        assert_eq!(owner, OwnerRef::BankAccount(account_id));
    }

    #[test]
    fn test_valid_credit_card_draft() {
        let card_id = Uuid::new_v4();
        let owner = validate_owner_ref(&draft(OwnerKind::CreditCard, None, Some(card_id))).unwrap();

        assert_eq!(owner, OwnerRef::CreditCard(card_id));
    }

    #[test]
    fn test_both_references_rejected() {
        // The kind tag cannot save a draft that sets both columns
        for kind in [OwnerKind::BankAccount, OwnerKind::CreditCard] {
            let err = validate_owner_ref(&draft(kind, Some(Uuid::new_v4()), Some(Uuid::new_v4())))
                .unwrap_err();

            assert!(matches!(err, ValidationError::BothReferencesPresent { .. }));
            assert_eq!(err.error_code(), "BOTH_REFERENCES_PRESENT");
        }
    }

    #[test]
    fn test_no_reference_rejected() {
        for kind in [OwnerKind::BankAccount, OwnerKind::CreditCard] {
            let err = validate_owner_ref(&draft(kind, None, None)).unwrap_err();

            assert!(matches!(
                err,
                ValidationError::NoReferencePresent { kind: k, .. } if k == kind
            ));
            assert_eq!(err.error_code(), "NO_REFERENCE_PRESENT");
        }
    }

    #[test]
    fn test_bank_tag_with_card_reference_rejected() {
        let err = validate_owner_ref(&draft(OwnerKind::BankAccount, None, Some(Uuid::new_v4())))
            .unwrap_err();

        assert!(matches!(
            err,
            ValidationError::TagMismatch {
                declared: OwnerKind::BankAccount,
                actual: OwnerKind::CreditCard,
                ..
            }
        ));
        assert_eq!(err.error_code(), "REFERENCE_TAG_MISMATCH");
    }

    #[test]
    fn test_card_tag_with_bank_reference_rejected() {
        let err = validate_owner_ref(&draft(OwnerKind::CreditCard, Some(Uuid::new_v4()), None))
            .unwrap_err();

        assert!(matches!(
            err,
            ValidationError::TagMismatch {
                declared: OwnerKind::CreditCard,
                actual: OwnerKind::BankAccount,
                ..
            }
        ));
    }

    #[test]
    fn test_error_carries_user_id() {
        let user_id = Uuid::new_v4();
        let candidate = PaymentMethodDraft {
            user_id,
            kind: OwnerKind::CreditCard,
            bank_account_id: None,
            credit_card_id: None,
        };

        let err = validate_owner_ref(&candidate).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::NoReferencePresent { user_id: u, .. } if u == user_id
        ));
    }
}
