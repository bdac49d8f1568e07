//! Outbound notifications.
//!
//! Domain services hand finished notifications to a [`Notifier`] and move on;
//! nothing in an order or registration flow ever waits on delivery. The
//! default implementation queues onto an unbounded channel drained by a
//! background task, so a slow or failing sink cannot stall a request.

use mockall::automock;
use tokio::sync::mpsc;
use tracing::{error, info};

/// A message addressed to one or more recipients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub recipients: Vec<String>,
}

/// Fire-and-forget notification dispatch.
#[automock]
pub trait Notifier: Send + Sync {
    /// Enqueue a notification for delivery. Must not block and must not fail
    /// the caller; delivery problems are the implementation's to log.
    fn notify(&self, notification: Notification);
}

/// Channel-backed [`Notifier`] with a spawned drain task.
#[derive(Debug, Clone)]
pub struct QueuedNotifier {
    sender: mpsc::UnboundedSender<Notification>,
}

impl QueuedNotifier {
    /// Create the notifier and spawn its worker on the current runtime.
    #[must_use]
    pub fn spawn() -> Self {
        let (sender, mut receiver) = mpsc::unbounded_channel::<Notification>();

        tokio::spawn(async move {
            while let Some(notification) = receiver.recv().await {
                deliver(&notification);
            }
        });

        Self { sender }
    }
}

impl Notifier for QueuedNotifier {
    fn notify(&self, notification: Notification) {
        // Send only fails when the worker is gone, i.e. during shutdown.
        if let Err(send_error) = self.sender.send(notification) {
            error!("notification dropped, worker stopped: {send_error}");
        }
    }
}

fn deliver(notification: &Notification) {
    // Mail transport is not wired up; record the dispatch so operators can
    // trace what would have been sent.
    info!(
        title = %notification.title,
        recipients = ?notification.recipients,
        "dispatching notification"
    );
}
