use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Structured logging bootstrap, lifted from the teacher's `main.rs`
/// (`tracing_subscriber::registry().with(EnvFilter).with(fmt::layer())`).
/// OpenTelemetry export is an external collaborator (spec.md §1) — this
/// installs only the local `fmt` layer.
pub fn init() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
