use std::time::Duration;

use async_trait::async_trait;
use pixy_core::lead::LeadRecord;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("lead endpoint returned status {0}")]
    Status(u16),
    #[error("network failure: {0}")]
    Network(String),
}

/// Single-attempt submission seam. No retry scheduling lives behind this
/// trait; a failed attempt is final for the conversation.
#[async_trait]
pub trait LeadSubmitter: Send + Sync {
    async fn submit(&self, lead: &LeadRecord) -> Result<(), SubmitError>;
}

pub struct HttpLeadSubmitter {
    client: reqwest::Client,
    endpoint_url: String,
}

impl HttpLeadSubmitter {
    pub fn new(
        endpoint_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint_url: endpoint_url.into() })
    }

    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }
}

#[async_trait]
impl LeadSubmitter for HttpLeadSubmitter {
    async fn submit(&self, lead: &LeadRecord) -> Result<(), SubmitError> {
        let response = self
            .client
            .post(&self.endpoint_url)
            .json(lead)
            .send()
            .await
            .map_err(|error| SubmitError::Network(error.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(SubmitError::Status(status.as_u16()))
        }
    }
}
