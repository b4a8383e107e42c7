//! Actions domain module.
//!
//! Host-facing directives and the stateless actions that emit them.

mod directive;
mod greet;

pub use directive::Directive;
pub use greet::{greet, GREET_ACTION};
