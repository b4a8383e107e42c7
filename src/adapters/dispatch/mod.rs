//! Dispatcher adapters.
//!
//! - `CollectingDispatcher` - Records messages in memory
//! - `TemplateDispatcher` - Renders messages through a `TemplateCatalog`

mod collecting;
mod template;

pub use collecting::{CollectingDispatcher, DispatchedMessage};
pub use template::{TemplateCatalog, TemplateDispatcher};
