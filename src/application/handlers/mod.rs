//! Action handlers.

mod form_action;
mod greet_user;

pub use form_action::{FormActionHandler, FormTurn};
pub use greet_user::GreetUserHandler;
