pub mod session_flow;
pub mod session_state;

pub use session_flow::SessionFlow;
pub use session_state::{EvaluationInputs, InputMode, SessionState, Step};
