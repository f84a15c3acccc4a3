pub mod config;
pub mod dialogue;
pub mod errors;
pub mod lead;
pub mod pricing;
pub mod session;

pub use config::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};
pub use dialogue::{ClosedReason, DialogueEngine, DialogueStage, EngineOutput};
pub use errors::{ApplicationError, DomainError, InterfaceError};
pub use lead::{LeadDraft, LeadRecord};
pub use pricing::{Estimate, RateCard};
pub use session::{ChatRole, ChatTurn, ServiceBranch, SessionState};
