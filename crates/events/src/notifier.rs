//! Fire-and-forget booking notification publisher.
//!
//! Handlers never talk to the notification queue directly. [`NotificationPublisher::notify`]
//! serializes the message and offers it to a bounded in-process channel
//! without blocking; a single [`DeliveryWorker`] task drains the channel and
//! publishes each payload to the notification stream, waiting for the broker
//! acknowledgement. A full channel or a failed publish drops the message and
//! bumps a counter — booking requests are never delayed or failed because of
//! the notification path.
//!
//! Dropping the last publisher handle closes the channel; the worker then
//! drains whatever is buffered and exits, which is how shutdown flushes
//! pending notifications.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_nats::jetstream;
use async_nats::jetstream::stream::{Config as StreamConfig, RetentionPolicy, StorageType};
use serde::Serialize;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use bistro_core::contracts::{NOTIFY_STREAM, NOTIFY_SUBJECT};
use bistro_db::models::booking::Booking;

use crate::envelope::NotificationMessage;

/// Upper bound on a single publish attempt, broker ack included.
const PUBLISH_TIMEOUT: Duration = Duration::from_secs(5);

/// Connection settings for the notification queue.
#[derive(Debug, Clone)]
pub struct NotifierConfig {
    /// Queue server URL.
    pub url: String,
    /// Subject booking notifications are published on.
    pub subject: String,
    /// In-process buffer size; messages beyond it are dropped.
    pub queue_capacity: usize,
}

impl NotifierConfig {
    /// Load notifier settings from environment variables with defaults.
    ///
    /// | Env Var                 | Default                  |
    /// |-------------------------|--------------------------|
    /// | `NATS_URL`              | `nats://localhost:4222`  |
    /// | `NOTIFY_SUBJECT`        | `notifications.booking`  |
    /// | `NOTIFY_QUEUE_CAPACITY` | `256`                    |
    pub fn from_env() -> Self {
        let url = std::env::var("NATS_URL").unwrap_or_else(|_| "nats://localhost:4222".into());

        let subject = std::env::var("NOTIFY_SUBJECT").unwrap_or_else(|_| NOTIFY_SUBJECT.into());

        let queue_capacity: usize = std::env::var("NOTIFY_QUEUE_CAPACITY")
            .unwrap_or_else(|_| "256".into())
            .parse()
            .expect("NOTIFY_QUEUE_CAPACITY must be a valid usize");

        Self {
            url,
            subject,
            queue_capacity,
        }
    }
}

/// Errors raised while connecting the publisher or delivering a payload.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("queue connection failed: {0}")]
    Connect(#[from] async_nats::ConnectError),
    #[error("stream setup failed: {0}")]
    Stream(String),
    #[error("publish failed: {0}")]
    Publish(String),
    #[error("publish timed out")]
    Timeout,
}

/// Counters for the notification pipeline.
///
/// `enqueued` counts messages accepted into the buffer, `published` those
/// acknowledged by the broker; `dropped` and `failed` make the lossy
/// fire-and-forget behavior observable.
#[derive(Debug, Default)]
pub struct PublisherMetrics {
    enqueued: AtomicU64,
    published: AtomicU64,
    dropped: AtomicU64,
    failed: AtomicU64,
}

impl PublisherMetrics {
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            enqueued: self.enqueued.load(Ordering::Relaxed),
            published: self.published.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time view of [`PublisherMetrics`], serializable for readiness
/// output and shutdown logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub enqueued: u64,
    pub published: u64,
    pub dropped: u64,
    pub failed: u64,
}

/// Cheaply cloneable handle for enqueueing booking notifications.
#[derive(Debug, Clone)]
pub struct NotificationPublisher {
    tx: mpsc::Sender<Vec<u8>>,
    metrics: Arc<PublisherMetrics>,
}

impl NotificationPublisher {
    /// Connect to the queue server, ensure the notification stream exists,
    /// and spawn the delivery worker.
    ///
    /// The returned handle joins the worker; await it (with a deadline) after
    /// dropping every publisher clone to flush buffered notifications.
    pub async fn connect(config: &NotifierConfig) -> Result<(Self, JoinHandle<()>), NotifyError> {
        let client = async_nats::connect(&config.url).await?;
        let jetstream = jetstream::new(client);

        // Work-queue retention: each notification is consumed exactly once
        // by whichever mailer instance picks it up.
        jetstream
            .get_or_create_stream(StreamConfig {
                name: NOTIFY_STREAM.to_string(),
                description: Some("Booking notifications awaiting delivery".to_string()),
                subjects: vec![config.subject.clone()],
                retention: RetentionPolicy::WorkQueue,
                storage: StorageType::File,
                ..Default::default()
            })
            .await
            .map_err(|e| NotifyError::Stream(e.to_string()))?;

        let (tx, rx) = mpsc::channel(config.queue_capacity);
        let metrics = Arc::new(PublisherMetrics::default());

        let worker = DeliveryWorker {
            jetstream,
            subject: config.subject.clone(),
            rx,
            metrics: Arc::clone(&metrics),
        };
        let handle = tokio::spawn(worker.run());

        Ok((Self { tx, metrics }, handle))
    }

    /// Build a publisher without a broker connection or worker.
    ///
    /// The receiver end of the buffer is handed back so the caller can
    /// observe exactly what would have been published.
    pub fn detached(queue_capacity: usize) -> (Self, mpsc::Receiver<Vec<u8>>) {
        let (tx, rx) = mpsc::channel(queue_capacity);
        let metrics = Arc::new(PublisherMetrics::default());
        (Self { tx, metrics }, rx)
    }

    /// Offer a `booking.created` notification to the delivery buffer.
    ///
    /// Never blocks and never fails the caller: a full or closed buffer
    /// drops the message and increments the drop counter.
    pub fn notify(&self, booking: &Booking) {
        let payload = match serde_json::to_vec(&NotificationMessage::booking_created(booking)) {
            Ok(payload) => payload,
            Err(e) => {
                self.metrics.failed.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(error = %e, booking_id = booking.id, "Notification encode failed");
                return;
            }
        };

        match self.tx.try_send(payload) {
            Ok(()) => {
                self.metrics.enqueued.fetch_add(1, Ordering::Relaxed);
            }
            Err(mpsc::error::TrySendError::Full(_)) => {
                self.metrics.dropped.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(booking_id = booking.id, "Notification buffer full, dropping");
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                self.metrics.dropped.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(booking_id = booking.id, "Notification worker gone, dropping");
            }
        }
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}

/// Drains the buffer and publishes each payload, one at a time.
struct DeliveryWorker {
    jetstream: jetstream::Context,
    subject: String,
    rx: mpsc::Receiver<Vec<u8>>,
    metrics: Arc<PublisherMetrics>,
}

impl DeliveryWorker {
    async fn run(mut self) {
        while let Some(payload) = self.rx.recv().await {
            match self.publish(payload).await {
                Ok(()) => {
                    self.metrics.published.fetch_add(1, Ordering::Relaxed);
                }
                Err(e) => {
                    // Fire and forget: count it and move on to the next message.
                    self.metrics.failed.fetch_add(1, Ordering::Relaxed);
                    tracing::warn!(error = %e, "Notification publish failed");
                }
            }
        }
        tracing::debug!("Notification worker drained");
    }

    async fn publish(&self, payload: Vec<u8>) -> Result<(), NotifyError> {
        let ack = tokio::time::timeout(
            PUBLISH_TIMEOUT,
            self.jetstream.publish(self.subject.clone(), payload.into()),
        )
        .await
        .map_err(|_| NotifyError::Timeout)?
        .map_err(|e| NotifyError::Publish(e.to_string()))?;

        // Wait for the broker to confirm the message was stored.
        tokio::time::timeout(PUBLISH_TIMEOUT, ack)
            .await
            .map_err(|_| NotifyError::Timeout)?
            .map_err(|e| NotifyError::Publish(e.to_string()))?;

        Ok(())
    }
}
