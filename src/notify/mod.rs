// src/notify/mod.rs
pub mod email;

use anyhow::Result;

use crate::listing::AnnotatedListing;

/// Delivery channel for the matched subset of a run.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, matched: &[AnnotatedListing]) -> Result<()>;
}

// --- Test helper ---
pub struct MockNotifier {
    pub calls: std::sync::Mutex<Vec<Vec<AnnotatedListing>>>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self {
            calls: std::sync::Mutex::new(vec![]),
        }
    }
}

impl Default for MockNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Notifier for MockNotifier {
    async fn notify(&self, matched: &[AnnotatedListing]) -> Result<()> {
        self.calls.lock().unwrap().push(matched.to_vec());
        Ok(())
    }
}
