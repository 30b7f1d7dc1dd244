pub mod extractor;
pub mod hint_service;
pub mod normalizer;
pub mod session_store;

pub use extractor::QuestionExtractor;
pub use hint_service::{ApiKeyCheck, HintService};
pub use normalizer::normalize;
pub use session_store::{SessionStore, StoredState};
