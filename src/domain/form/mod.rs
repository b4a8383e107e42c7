//! Form domain module.
//!
//! A generic slot-collection engine: a `SlotRegistry` declares what to
//! collect and how, a `FormSession` walks the required slots in order,
//! extracting and validating one candidate per turn until the form is
//! complete and can be submitted.

mod contact;
mod errors;
pub mod messages;
mod registry;
mod session;
mod slot;
mod state;
mod status;
mod validators;

pub use contact::{contact_form, CONTACT_FORM};
pub use errors::FormError;
pub use registry::{SlotRegistry, SlotRegistryBuilder};
pub use session::{FormSession, IngestOutcome, SubmitResult};
pub use slot::{ExtractionStrategy, SlotDefinition};
pub use state::FormState;
pub use status::FormStatus;
pub use validators::{validate_email, validate_phone, ValidationOutcome, Validator, PHONE_DIGITS};
