//! Payment methods: drafts, validation, stored records, registration,
//! and read models

pub mod draft;
pub mod record;
pub mod registry;
pub mod report;
pub mod validate;

pub use draft::PaymentMethodDraft;
pub use record::PaymentMethod;
pub use registry::PaymentMethodRegistry;
pub use report::{OwnerSnapshot, PaymentMethodView, UserPaymentMethods};
pub use validate::validate_owner_ref;
