//! # Desired-Set Feed
//!
//! Multi-subscriber feed of the user's desired currency set.
//!
//! Every publication is a complete replacement, so the feed only needs to
//! hold the latest value: a slow subscriber that misses intermediate sets
//! still converges on the newest one.

use futures::future;
use futures::stream::{BoxStream, StreamExt};
use shared_types::DesiredSet;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tracing::debug;

use crate::subscriber::SubscriptionError;

/// Stream of desired sets, one item per observed replacement.
pub type DesiredSetStream = BoxStream<'static, DesiredSet>;

/// Latest-value feed of the desired set.
///
/// Dropping the feed closes every stream obtained from it.
#[derive(Debug)]
pub struct DesiredSetFeed {
    sender: watch::Sender<Option<DesiredSet>>,
}

impl DesiredSetFeed {
    /// Create a feed with no value yet.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = watch::channel(None);
        Self { sender }
    }

    /// Create a feed that already holds `initial`.
    #[must_use]
    pub fn with_initial(initial: DesiredSet) -> Self {
        let (sender, _) = watch::channel(Some(initial));
        Self { sender }
    }

    /// Replace the desired set.
    pub fn publish(&self, desired: DesiredSet) {
        debug!(currencies = desired.len(), "Desired set published");
        self.sender.send_replace(Some(desired));
    }

    /// The latest published set, if any.
    #[must_use]
    pub fn current(&self) -> Option<DesiredSet> {
        self.sender.borrow().clone()
    }

    /// Observe the feed: yields the latest set (if one exists) and then
    /// every replacement.
    #[must_use]
    pub fn subscribe(&self) -> DesiredSetStream {
        WatchStream::new(self.sender.subscribe())
            .filter_map(future::ready)
            .boxed()
    }

    /// Read the next available set and stop observing.
    ///
    /// Returns immediately when a set has already been published, otherwise
    /// waits for the first publication.
    pub async fn first(&self) -> Result<DesiredSet, SubscriptionError> {
        let mut receiver = self.sender.subscribe();
        loop {
            if let Some(desired) = receiver.borrow_and_update().clone() {
                return Ok(desired);
            }
            receiver
                .changed()
                .await
                .map_err(|_| SubscriptionError::Closed)?;
        }
    }

    /// Number of live observers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for DesiredSetFeed {
    fn default() -> Self {
        Self::new()
    }
}
