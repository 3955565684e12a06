use async_trait::async_trait;

/// `service_ready()` from spec.md §4.4.1: true iff Repository and
/// Publisher are wired and the bus reports connected. Backs
/// `GET /readyz`.
#[async_trait]
pub trait ReadinessUseCase: Send + Sync {
    async fn is_ready(&self) -> bool;
}
