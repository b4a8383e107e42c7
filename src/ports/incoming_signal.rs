//! IncomingSignal port - Read-only view of one user turn.
//!
//! Extraction strategies only ever look at a turn through this trait, so
//! any host message shape (NLU parse result, CLI line, HTTP payload) can
//! feed the engine.

/// One incoming user turn as seen by slot extraction.
pub trait IncomingSignal: Send + Sync {
    /// Value of a structured field (e.g. an extracted entity) by key.
    fn structured_field(&self, key: &str) -> Option<&str>;

    /// The whole freeform text of the turn, if any.
    fn raw_text(&self) -> Option<&str>;
}
