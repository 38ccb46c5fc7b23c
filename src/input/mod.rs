//! Raw key and pointer transitions → deduplicated note events.

/// Held-key and pointer state machine.
pub mod dispatcher;
/// Static key-code → note tables and key labels.
pub mod keymap;

pub use dispatcher::{InputDispatcher, InputOutcome, Performer};
pub use keymap::{key_label, key_label_for_code, note_for_code};
