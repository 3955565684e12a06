use std::env;
use std::time::Duration;

/// Process-wide configuration, built once at startup and threaded
/// explicitly into every component constructor. Never read from a
/// global at a call site — see the "global mutable state" redesign
/// flag in spec.md §9.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub nats_url: String,
    pub projects_bucket: String,
    pub project_settings_bucket: String,
    pub sync_publish_timeout: Duration,
    pub skip_etag_validation: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
            nats_url: env::var("NATS_URL").unwrap_or_else(|_| "nats://127.0.0.1:4222".to_string()),
            projects_bucket: env::var("PROJECTS_BUCKET").unwrap_or_else(|_| "projects".to_string()),
            project_settings_bucket: env::var("PROJECT_SETTINGS_BUCKET")
                .unwrap_or_else(|_| "project-settings".to_string()),
            sync_publish_timeout: Duration::from_secs(
                env::var("SYNC_PUBLISH_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(10),
            ),
            skip_etag_validation: env::var("SKIP_ETAG_VALIDATION")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_combines_host_and_port() {
        let cfg = Config {
            host: "127.0.0.1".to_string(),
            port: 9090,
            nats_url: String::new(),
            projects_bucket: String::new(),
            project_settings_bucket: String::new(),
            sync_publish_timeout: Duration::from_secs(1),
            skip_etag_validation: false,
        };
        assert_eq!(cfg.bind_addr(), "127.0.0.1:9090");
    }
}
