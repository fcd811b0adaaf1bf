//! # Event Routing
//!
//! Delivers every engine event on the bus to a `SystemListener`. The
//! listener decides which events need work; the rest are accepted as no-ops.

use futures::StreamExt;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info};

use shared_bus::{EventFilter, EventStream, EventSubscriber};
use ws_01_wallet_tracker::SystemListener;

/// Routes bus events to a listener until shutdown or until the bus closes.
pub struct EventRouter<L: SystemListener> {
    events: EventStream,
    listener: Arc<L>,
}

impl<L: SystemListener> EventRouter<L> {
    /// Subscribe to every event on `bus`.
    pub fn new<B: EventSubscriber + ?Sized>(bus: &B, listener: Arc<L>) -> Self {
        Self {
            events: EventStream::new(bus.subscribe(EventFilter::all())),
            listener,
        }
    }

    /// Run the routing loop. Returns how many events were routed.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) -> usize {
        info!("[runtime] Event router started");
        let mut routed = 0;

        loop {
            tokio::select! {
                event = self.events.next() => {
                    let Some(event) = event else {
                        info!("[runtime] Event bus closed");
                        break;
                    };
                    routed += 1;
                    match self.listener.handle_event(&event) {
                        Some(_) => debug!("[runtime] {} dispatched", event.kind()),
                        None => debug!("[runtime] {} ignored", event.kind()),
                    }
                }
                _ = shutdown.changed() => {
                    info!("[runtime] Event router shutting down");
                    break;
                }
            }
        }

        routed
    }
}
