pub mod engine;
pub mod state;

pub use engine::{Status, TransitionEngine, TransitionResult};
pub use state::{next_state, Action, WorkflowState};
