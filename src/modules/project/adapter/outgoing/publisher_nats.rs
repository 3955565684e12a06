use std::time::Duration;

use async_nats::Client;
use async_trait::async_trait;
use tracing::error;

use crate::modules::project::application::ports::outgoing::{Envelope, PublishError, Publisher};

/// [`Publisher`] over a plain NATS connection. Sync mode rides NATS
/// request/reply; async mode is a plain publish (spec.md §4.3).
pub struct NatsPublisher {
    client: Client,
}

impl NatsPublisher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn encode(envelope: &Envelope) -> Result<bytes::Bytes, PublishError> {
        serde_json::to_vec(envelope)
            .map(bytes::Bytes::from)
            .map_err(|e| PublishError::Unavailable(e.to_string()))
    }
}

#[async_trait]
impl Publisher for NatsPublisher {
    async fn publish_async(&self, subject: &str, envelope: &Envelope) -> Result<(), PublishError> {
        let payload = Self::encode(envelope)?;
        self.client
            .publish(subject.to_string(), payload)
            .await
            .map_err(|e| PublishError::Unavailable(e.to_string()))
    }

    async fn publish_sync(
        &self,
        subject: &str,
        envelope: &Envelope,
        timeout: Duration,
    ) -> Result<(), PublishError> {
        let payload = Self::encode(envelope)?;
        match tokio::time::timeout(timeout, self.client.request(subject.to_string(), payload)).await {
            Ok(Ok(reply)) => {
                // Reply headers carrying an error marker (spec.md
                // §4.4.7) are the one place this core peeks at a bus
                // reply's shape rather than treating it as opaque.
                if reply.headers.as_ref().map(|h| h.get("error").is_some()).unwrap_or(false) {
                    error!(subject, "sync publish received an error reply");
                    return Err(PublishError::Unavailable("downstream replied with an error".to_string()));
                }
                Ok(())
            }
            Ok(Err(e)) => {
                error!(subject, error = %e, "sync publish request failed");
                Err(PublishError::Unavailable(e.to_string()))
            }
            Err(_) => Err(PublishError::Timeout),
        }
    }

    fn is_connected(&self) -> bool {
        matches!(
            self.client.connection_state(),
            async_nats::connection::State::Connected
        )
    }
}
