//! Domain layer containing the form engine and its vocabulary.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (IDs, timestamps, errors, state machine)
//! - `form` - Slot registry, validators and the form session driver
//! - `actions` - Host directives and stateless actions (greeting)

pub mod actions;
pub mod form;
pub mod foundation;
