//! Session layer: eligible-row navigation, the annotation editor, and the
//! finalize state machine that walks a reviewer through the table.

pub mod editor;
pub mod navigator;

mod session;
pub use editor::AskInput;
pub use session::{FinalizeOutcome, ReviewPrompt, ReviewSession, SessionError};
