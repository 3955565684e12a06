use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::modules::project::application::ports::outgoing::{Envelope, PublishError, Publisher};

/// Records every envelope it is handed, on which subject, and reports
/// connected unless told otherwise — the `MockGetProjectsUseCase`-style
/// test double the teacher hand-rolls per trait (spec.md grounding:
/// `create_project_service.rs`'s own `#[cfg(test)]` mocks). `fail_subject`
/// lets a test reproduce a downstream reply error on one specific topic
/// without tearing down the whole publisher (spec.md §8's S6).
#[derive(Default)]
pub struct RecordingPublisher {
    connected: AtomicBool,
    async_count: AtomicUsize,
    sync_count: AtomicUsize,
    pub envelopes: Mutex<Vec<Envelope>>,
    pub subjects: Mutex<Vec<String>>,
    fail_subject: Mutex<Option<String>>,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self {
            connected: AtomicBool::new(true),
            ..Default::default()
        }
    }

    pub fn disconnected() -> Self {
        Self {
            connected: AtomicBool::new(false),
            ..Default::default()
        }
    }

    /// Like [`Self::new`], but `subject` fails every publish attempt
    /// with `PublishError::Unavailable` instead of recording it.
    pub fn failing_on(subject: &str) -> Self {
        Self {
            connected: AtomicBool::new(true),
            fail_subject: Mutex::new(Some(subject.to_string())),
            ..Default::default()
        }
    }

    pub fn publish_count(&self) -> usize {
        self.async_count.load(Ordering::SeqCst) + self.sync_count.load(Ordering::SeqCst)
    }

    fn record(&self, subject: &str, envelope: &Envelope) -> Result<(), PublishError> {
        if self.fail_subject.lock().expect("mutex poisoned").as_deref() == Some(subject) {
            return Err(PublishError::Unavailable(format!("{subject} unavailable")));
        }
        self.subjects.lock().expect("mutex poisoned").push(subject.to_string());
        self.envelopes.lock().expect("mutex poisoned").push(envelope.clone());
        Ok(())
    }
}

#[async_trait]
impl Publisher for RecordingPublisher {
    async fn publish_async(&self, subject: &str, envelope: &Envelope) -> Result<(), PublishError> {
        self.async_count.fetch_add(1, Ordering::SeqCst);
        self.record(subject, envelope)
    }

    async fn publish_sync(
        &self,
        subject: &str,
        envelope: &Envelope,
        _timeout: Duration,
    ) -> Result<(), PublishError> {
        self.sync_count.fetch_add(1, Ordering::SeqCst);
        self.record(subject, envelope)
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }
}
