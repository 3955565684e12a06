use std::sync::Arc;

use async_nats::{Client, HeaderMap};
use bytes::Bytes;
use futures::StreamExt;
use tracing::{error, warn};

use crate::modules::project::application::ProjectUseCases;
use crate::modules::project::subjects;
use crate::shared::AppError;

/// Subject → handler dispatch for the five lookup RPCs a peer service
/// can make over the bus (spec.md §4.4.7, §6). Each subject gets its
/// own subscription task; a reply carries either the raw string result
/// or an `error` header naming the domain error (spec.md §7's alphabet).
pub struct BusRouter {
    client: Client,
    use_cases: Arc<ProjectUseCases>,
}

const RPC_SUBJECTS: [&str; 5] = [
    subjects::RPC_GET_NAME,
    subjects::RPC_GET_SLUG,
    subjects::RPC_GET_LOGO,
    subjects::RPC_GET_PARENT_UID,
    subjects::RPC_SLUG_TO_UID,
];

impl BusRouter {
    pub fn new(client: Client, use_cases: Arc<ProjectUseCases>) -> Self {
        Self { client, use_cases }
    }

    /// Spawns one subscription task per RPC subject. Tasks run for the
    /// lifetime of the process; a subscription that ends (connection
    /// drop) is logged, not retried here — the NATS client itself
    /// handles reconnection underneath.
    pub fn spawn(&self) {
        for subject in RPC_SUBJECTS {
            let client = self.client.clone();
            let use_cases = self.use_cases.clone();
            tokio::spawn(async move {
                if let Err(e) = Self::serve(client, use_cases, subject).await {
                    error!(subject, error = %e, "lookup RPC subscription ended");
                }
            });
        }
    }

    async fn serve(
        client: Client,
        use_cases: Arc<ProjectUseCases>,
        subject: &'static str,
    ) -> Result<(), async_nats::Error> {
        let mut subscriber = client.subscribe(subject).await?;
        while let Some(message) = subscriber.next().await {
            let Some(reply_to) = message.reply.clone() else {
                warn!(subject, "lookup RPC message carried no reply subject, dropping");
                continue;
            };

            let request = String::from_utf8_lossy(&message.payload).to_string();
            let outcome = Self::dispatch(&use_cases, subject, &request).await;

            let publish_result = match outcome {
                Ok(value) => client.publish(reply_to, Bytes::from(value.into_bytes())).await,
                Err(err) => {
                    warn!(subject, request, error = %err, "lookup RPC resolved to a domain error");
                    let mut headers = HeaderMap::new();
                    headers.insert("error", err.code());
                    client
                        .publish_with_headers(reply_to, headers, Bytes::new())
                        .await
                }
            };

            if let Err(e) = publish_result {
                error!(subject, error = %e, "failed to send lookup RPC reply");
            }
        }
        Ok(())
    }

    async fn dispatch(
        use_cases: &ProjectUseCases,
        subject: &str,
        request: &str,
    ) -> Result<String, AppError> {
        match subject {
            s if s == subjects::RPC_GET_NAME => use_cases.get_name.execute(request).await,
            s if s == subjects::RPC_GET_SLUG => use_cases.get_slug.execute(request).await,
            s if s == subjects::RPC_GET_LOGO => use_cases.get_logo.execute(request).await,
            s if s == subjects::RPC_GET_PARENT_UID => use_cases.get_parent_uid.execute(request).await,
            s if s == subjects::RPC_SLUG_TO_UID => use_cases.slug_to_uid.execute(request).await,
            other => Err(AppError::Internal(format!("unroutable bus subject: {other}"))),
        }
    }
}
