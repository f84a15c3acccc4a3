use std::sync::Arc;
use std::time::Duration;

use pixy_core::config::AppConfig;
use pixy_core::ApplicationError;
use pixy_delivery::{FileBackupStore, HttpLeadSubmitter, LeadPipeline};
use tracing::info;

use crate::sessions::SessionRegistry;

pub struct Application {
    pub config: Arc<AppConfig>,
    pub registry: Arc<SessionRegistry>,
    pub pipeline: Arc<LeadPipeline>,
}

/// Wires the delivery pipeline and session registry from an already-loaded
/// config; the caller owns config loading and logging setup.
pub fn bootstrap(config: AppConfig) -> Result<Application, ApplicationError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        "starting application bootstrap"
    );

    let submitter = HttpLeadSubmitter::new(
        config.submission.endpoint_url.clone(),
        Duration::from_secs(config.submission.timeout_secs),
    )
    .map_err(|error| {
        ApplicationError::Submission(format!("lead submission client init failed: {error}"))
    })?;
    info!(
        event_name = "system.bootstrap.submitter_ready",
        correlation_id = "bootstrap",
        endpoint_url = %submitter.endpoint_url(),
        "lead submission client initialized"
    );

    let backup = FileBackupStore::new(config.backup.path.clone());
    let pipeline = Arc::new(LeadPipeline::new(Arc::new(submitter), Arc::new(backup)));

    Ok(Application {
        config: Arc::new(config),
        registry: Arc::new(SessionRegistry::new()),
        pipeline,
    })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pixy_core::config::AppConfig;

    use crate::bootstrap::bootstrap;

    #[test]
    fn bootstrap_succeeds_with_default_configuration() {
        let app = bootstrap(AppConfig::default()).expect("bootstrap should succeed");
        assert!(app.registry.is_empty());
        assert!(app.config.submission.endpoint_url.starts_with("https://"));
    }

    #[test]
    fn bootstrap_keeps_the_caller_loaded_config() {
        let mut config = AppConfig::default();
        config.backup.path = PathBuf::from("/tmp/pixy-leads.json");
        config.submission.timeout_secs = 3;

        let app = bootstrap(config).expect("bootstrap should succeed");
        assert_eq!(app.config.backup.path, PathBuf::from("/tmp/pixy-leads.json"));
        assert_eq!(app.config.submission.timeout_secs, 3);
    }
}
