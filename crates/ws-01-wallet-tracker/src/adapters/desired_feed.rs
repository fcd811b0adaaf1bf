//! Binds the shared desired-set feed to the `DesiredSetSource` port.

use async_trait::async_trait;
use shared_bus::{DesiredSetFeed, DesiredSetStream};
use shared_types::DesiredSet;

use crate::domain::TrackerError;
use crate::ports::DesiredSetSource;

#[async_trait]
impl DesiredSetSource for DesiredSetFeed {
    fn subscribe(&self) -> DesiredSetStream {
        DesiredSetFeed::subscribe(self)
    }

    async fn first(&self) -> Result<DesiredSet, TrackerError> {
        Ok(DesiredSetFeed::first(self).await?)
    }
}
