//! View-state holder for the listing overview.
//!
//! `OverviewViewModel` starts a fetch as soon as it is built and publishes two
//! values through `tokio::sync::watch`: the status of the latest attempt and
//! the current list of properties. Observers subscribe to read-only receivers.
//!
//! Every write goes through one `CompletionSink`. Teardown empties the sink
//! under its lock before aborting the task, so once `clear` returns nothing
//! else is published.

use crate::adapters::http::MarsApi;
use crate::core::{ListingSource, MarsApiStatus, MarsProperty, Result};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;
use tokio::task::JoinHandle;

struct Publisher {
    status: watch::Sender<MarsApiStatus>,
    properties: watch::Sender<Vec<MarsProperty>>,
    generation: u64,
}

struct CompletionSink {
    publisher: Mutex<Option<Publisher>>,
}

impl CompletionSink {
    fn new(publisher: Publisher) -> Self {
        Self {
            publisher: Mutex::new(Some(publisher)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<Publisher>> {
        // Each send is atomic, so a poisoned lock still guards consistent state.
        self.publisher
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Opens a new attempt and resets the status to `Loading`.
    /// Returns `None` once the sink is closed.
    fn begin(&self) -> Option<u64> {
        let mut guard = self.lock();
        let publisher = guard.as_mut()?;
        publisher.generation += 1;
        publisher.status.send_replace(MarsApiStatus::Loading);
        Some(publisher.generation)
    }

    /// Publishes the outcome of attempt `generation`. Outcomes of superseded
    /// attempts, or arriving after close, are dropped and `false` is returned.
    fn complete(&self, generation: u64, outcome: Result<Vec<MarsProperty>>) -> bool {
        let guard = self.lock();
        let Some(publisher) = guard.as_ref().filter(|p| p.generation == generation) else {
            return false;
        };

        match outcome {
            Ok(properties) => {
                // An empty result keeps whatever was shown before.
                if !properties.is_empty() {
                    publisher.properties.send_replace(properties);
                }
                publisher.status.send_replace(MarsApiStatus::Done);
            }
            Err(_) => {
                publisher.status.send_replace(MarsApiStatus::Error);
            }
        }
        true
    }

    fn close(&self) -> bool {
        self.lock().take().is_some()
    }
}

async fn fetch_properties(source: Arc<dyn ListingSource>, sink: Arc<CompletionSink>, generation: u64) {
    let outcome = source.get_properties().await;

    match &outcome {
        Ok(properties) => tracing::info!("Fetched {} Mars properties", properties.len()),
        Err(e) => tracing::warn!("Fetching Mars properties failed: {}", e),
    }

    if !sink.complete(generation, outcome) {
        tracing::debug!("Discarded result of superseded fetch #{}", generation);
    }
}

pub struct OverviewViewModel {
    source: Arc<dyn ListingSource>,
    sink: Arc<CompletionSink>,
    status: watch::Receiver<MarsApiStatus>,
    properties: watch::Receiver<Vec<MarsProperty>>,
    job: Option<JoinHandle<()>>,
}

impl OverviewViewModel {
    /// Builds the holder and starts the first fetch.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(source: Arc<dyn ListingSource>) -> Self {
        let (status_tx, status) = watch::channel(MarsApiStatus::Loading);
        let (properties_tx, properties) = watch::channel(Vec::new());

        let sink = Arc::new(CompletionSink::new(Publisher {
            status: status_tx,
            properties: properties_tx,
            generation: 0,
        }));

        let mut view_model = Self {
            source,
            sink,
            status,
            properties,
            job: None,
        };
        view_model.refresh();
        view_model
    }

    /// Holder backed by the shared service for the fixed base URL.
    pub fn with_default_service() -> Self {
        Self::new(MarsApi::service())
    }

    /// Starts a new attempt, cancelling the one in flight. No-op after `clear`.
    pub fn refresh(&mut self) {
        if let Some(job) = self.job.take() {
            job.abort();
        }

        let Some(generation) = self.sink.begin() else {
            tracing::debug!("Ignoring refresh on a cleared overview");
            return;
        };

        tracing::debug!("Starting fetch #{}", generation);
        let source = Arc::clone(&self.source);
        let sink = Arc::clone(&self.sink);
        self.job = Some(tokio::spawn(fetch_properties(source, sink, generation)));
    }

    pub fn status(&self) -> watch::Receiver<MarsApiStatus> {
        self.status.clone()
    }

    pub fn properties(&self) -> watch::Receiver<Vec<MarsProperty>> {
        self.properties.clone()
    }

    pub fn current_status(&self) -> MarsApiStatus {
        *self.status.borrow()
    }

    pub fn current_properties(&self) -> Vec<MarsProperty> {
        self.properties.borrow().clone()
    }

    /// Waits until the current attempt leaves `Loading`, or the holder is
    /// cleared, and returns the status at that point.
    pub async fn settled(&self) -> MarsApiStatus {
        let mut status = self.status.clone();
        if let Ok(settled) = status.wait_for(|s| s.is_settled()).await {
            return *settled;
        }
        self.current_status()
    }

    /// Cancels the in-flight fetch. Nothing is published after this returns.
    pub fn clear(&mut self) {
        let was_open = self.sink.close();
        if let Some(job) = self.job.take() {
            job.abort();
        }
        if was_open {
            tracing::debug!("Overview cleared");
        }
    }
}

impl Drop for OverviewViewModel {
    fn drop(&mut self) {
        self.clear();
    }
}
