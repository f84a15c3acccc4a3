use std::sync::Arc;

use pixy_core::lead::LeadRecord;
use tracing::{error, info, warn};

use crate::backup::BackupStore;
use crate::submit::{LeadSubmitter, SubmitError};

/// Outcome of the two-step delivery saga: one bounded remote attempt,
/// then a best-effort local append on failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Delivered,
    BackedUp { error: SubmitError },
    Lost { error: SubmitError },
}

impl DeliveryOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered)
    }
}

pub struct LeadPipeline {
    submitter: Arc<dyn LeadSubmitter>,
    backup: Arc<dyn BackupStore>,
}

impl LeadPipeline {
    pub fn new(submitter: Arc<dyn LeadSubmitter>, backup: Arc<dyn BackupStore>) -> Self {
        Self { submitter, backup }
    }

    /// No retry and no queuing: the remote attempt happens exactly once,
    /// and backup errors are swallowed after logging.
    pub async fn deliver(&self, lead: &LeadRecord) -> DeliveryOutcome {
        match self.submitter.submit(lead).await {
            Ok(()) => {
                info!(
                    event_name = "lead.delivered",
                    lead_email = %lead.email,
                    service = ?lead.service,
                    "lead submitted to agency endpoint"
                );
                DeliveryOutcome::Delivered
            }
            Err(submit_error) => {
                warn!(
                    event_name = "lead.submission_failed",
                    lead_email = %lead.email,
                    error = %submit_error,
                    "lead submission failed, appending to local backup"
                );
                match self.backup.append(lead) {
                    Ok(()) => DeliveryOutcome::BackedUp { error: submit_error },
                    Err(backup_error) => {
                        error!(
                            event_name = "lead.backup_failed",
                            lead_email = %lead.email,
                            error = %backup_error,
                            "local backup append failed, lead is lost"
                        );
                        DeliveryOutcome::Lost { error: submit_error }
                    }
                }
            }
        }
    }
}
