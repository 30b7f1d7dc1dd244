pub mod hint_flow;
pub mod hint_session;

pub use hint_flow::{HintFlow, HintOutcome};
pub use hint_session::HintSession;
