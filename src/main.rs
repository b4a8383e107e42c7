//! Formbot CLI - Runs the contact form over stdin/stdout.
//!
//! Each input line is one user turn. Plain lines are taken as text; a JSON
//! object line may also carry entities. Rendered bot messages go to
//! stdout, logs to stderr.

use std::error::Error;
use std::io;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

use formbot::adapters::{InMemoryFormStateStore, TemplateDispatcher, UserMessage};
use formbot::application::{ActionRegistry, FormActionHandler, GreetUserHandler};
use formbot::config::AppConfig;
use formbot::domain::actions::{Directive, GREET_ACTION};
use formbot::domain::form::{contact_form, CONTACT_FORM};
use formbot::domain::foundation::ConversationId;
use formbot::ports::ActionRequest;

const HELP: &str = "Commands: /greet, /cancel, /quit. Anything else goes to the contact form. \
A JSON line can carry entities, e.g. {\"text\":\"hi\",\"entities\":{\"email\":\"a@b.com\"}}";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    config.validate()?;
    config.logging.init()?;

    let store = Arc::new(InMemoryFormStateStore::new());
    let contact = Arc::new(FormActionHandler::new(Arc::new(contact_form()?), store));

    let mut actions = ActionRegistry::new();
    actions.register(contact.clone())?;
    actions.register(Arc::new(GreetUserHandler::new()))?;
    tracing::info!(actions = ?actions.names(), "Formbot ready");

    let dispatcher = TemplateDispatcher::new(config.dispatch.catalog(), io::stdout());
    let conversation = ConversationId::new("cli")?;

    println!("{HELP}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let action = match line {
            "" => continue,
            "/quit" => break,
            "/cancel" => {
                if contact.cancel(&conversation).await? {
                    println!("(contact form cancelled)");
                }
                continue;
            }
            "/greet" => GREET_ACTION,
            _ => CONTACT_FORM,
        };

        let message = match UserMessage::parse_line(line) {
            Ok(message) => message,
            Err(e) => {
                eprintln!("Could not parse message: {e}");
                continue;
            }
        };

        let request = ActionRequest::new(&conversation, &message);
        match actions.run(action, request, &dispatcher).await {
            Ok(directives) => {
                for directive in directives {
                    match directive {
                        // No dialogue history is kept here, so there is nothing to rewind.
                        Directive::DiscardLastTurn => tracing::debug!("Turn discarded"),
                    }
                }
            }
            Err(e) => eprintln!("Error: {e}"),
        }
    }

    Ok(())
}
