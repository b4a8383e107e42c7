//! The contact form: name, email, phone and a free-text message.

use super::{FormError, SlotDefinition, SlotRegistry, Validator};

/// Name the host routes the contact form on.
pub const CONTACT_FORM: &str = "contact_form";

/// Builds the contact form definition.
///
/// Every slot is filled from the entity of the same name, falling back to
/// the whole message text. Email and phone are validated.
pub fn contact_form() -> Result<SlotRegistry, FormError> {
    SlotRegistry::builder(CONTACT_FORM)
        .slot(SlotDefinition::new("name"))
        .slot(SlotDefinition::new("email").with_validator(Validator::email()))
        .slot(SlotDefinition::new("phone").with_validator(Validator::phone()))
        .slot(SlotDefinition::new("message"))
        .build()
}
