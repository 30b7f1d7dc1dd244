pub mod chat;
pub mod extraction;
pub mod platform;
pub mod selectors;

pub use chat::{ChatMessage, ChatRole, HintLevel};
pub use extraction::{ExtractionReply, ExtractionResult};
pub use platform::Platform;
pub use selectors::{Field, SelectorSet, DEFAULT_SELECTORS};
