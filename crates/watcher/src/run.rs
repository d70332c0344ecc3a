//! Sequential per-organism run loop.
//!
//! Organisms are processed one at a time in configured order. A
//! failure (fetch, delivery, persistence) is logged and counted for
//! that organism only; the loop always moves on to the next one. The
//! notified set is only appended to after the webhook acknowledged
//! with HTTP 200, so failed deliveries are retried on the next run.

use std::time::Duration;

use thiserror::Error;
use tracing::{error, info};

use seqwatch_client::{FetchError, SampleSource};
use seqwatch_core::SequenceRecord;
use seqwatch_notify::{Notifier, NotifyError};
use seqwatch_store::{NotifiedStore, StoreError};

use crate::message::build_notification;

#[derive(Debug, Error)]
pub enum WatchError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Delivery(#[from] NotifyError),

    #[error(transparent)]
    Persistence(#[from] StoreError),

    #[error("failed to render message body: {0}")]
    Format(#[from] serde_json::Error),
}

/// What happened for one organism.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing new upstream; no webhook call, no side effects.
    NoNewSequences,
    /// Notification delivered and accessions recorded.
    Notified { new_count: usize },
}

/// Tunables for a run, taken from config and CLI.
#[derive(Debug, Clone)]
pub struct WatcherOptions {
    pub search_base_url: String,
    pub message_cap: usize,
    /// Pause after each webhook send (notification backend rate limits).
    pub delay: Duration,
}

/// Drives fetch → diff → classify → notify → persist per organism.
pub struct Watcher<S, N, T> {
    source: S,
    notifier: N,
    store: T,
    options: WatcherOptions,
}

impl<S, N, T> Watcher<S, N, T>
where
    S: SampleSource,
    N: Notifier,
    T: NotifiedStore,
{
    pub fn new(source: S, notifier: N, store: T, options: WatcherOptions) -> Self {
        Self {
            source,
            notifier,
            store,
            options,
        }
    }

    /// Process all organisms in order. Returns the number that failed.
    pub async fn run(&self, organisms: &[String]) -> usize {
        let mut failed = 0;
        for organism in organisms {
            match self.process_organism(organism).await {
                Ok(Outcome::NoNewSequences) => {
                    info!(%organism, "no new sequences");
                }
                Ok(Outcome::Notified { new_count }) => {
                    info!(%organism, new_count, "notification sent and recorded");
                    tokio::time::sleep(self.options.delay).await;
                }
                Err(e) => {
                    error!(%organism, error = %e, "organism processing failed");
                    failed += 1;
                }
            }
        }
        failed
    }

    /// fetch → diff → (skip | classify → format → send → persist)
    pub async fn process_organism(&self, organism: &str) -> Result<Outcome, WatchError> {
        let records = self.source.fetch_details(organism).await?;
        let notified = self.store.load(organism)?;

        let new_sequences: Vec<SequenceRecord> = records
            .into_iter()
            .filter(|r| !notified.contains(&r.accession_version))
            .collect();

        if new_sequences.is_empty() {
            return Ok(Outcome::NoNewSequences);
        }

        let notification = build_notification(
            organism,
            &new_sequences,
            self.options.message_cap,
            &self.options.search_base_url,
        )?;

        info!(organism, new_count = new_sequences.len(), "sending notification");
        self.notifier.send(&notification).await?;

        // Every new accession is recorded, not just the capped sample
        // shown in the message body.
        let accessions: Vec<String> = new_sequences
            .iter()
            .map(|r| r.accession_version.clone())
            .collect();
        self.store.append(organism, &accessions)?;

        Ok(Outcome::Notified {
            new_count: new_sequences.len(),
        })
    }
}
