pub mod engine;
pub mod keywords;
pub mod prompts;
pub mod states;

pub use engine::{DialogueEngine, EngineOutput};
pub use states::{ClosedReason, DialogueStage};
