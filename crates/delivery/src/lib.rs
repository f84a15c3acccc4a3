pub mod backup;
pub mod pipeline;
pub mod submit;

pub use backup::{BackupError, BackupStore, FileBackupStore};
pub use pipeline::{DeliveryOutcome, LeadPipeline};
pub use submit::{HttpLeadSubmitter, LeadSubmitter, SubmitError};
