//! Change notifications published by the scene.
//!
//! Every event means the scene changed and should be drawn again.

use chrono::{DateTime, Utc};
use tokio::sync::broadcast;

use scene_common::{CartesianPosition, GeoCoordinate};

/// Capacity of the event channel. Receivers that fall further behind miss the
/// oldest events.
pub const EVENT_CAPACITY: usize = 64;

/// A change in the scene.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneEvent {
    /// The projection centre moved. Existing meshes keep their old placement.
    CenterChanged(GeoCoordinate),
    /// The clock changed and the sun light moved.
    SunMoved {
        clock: DateTime<Utc>,
        position: CartesianPosition,
    },
    /// A building was added.
    BuildingAdded { id: usize },
    /// All buildings were projected again against the current centre.
    BuildingsReprojected { count: usize },
    /// All buildings were removed.
    Unloaded,
}

/// Fan-out of scene events to any number of subscribers.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<SceneEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(EVENT_CAPACITY);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SceneEvent> {
        self.sender.subscribe()
    }

    /// Publish an event. Having no subscribers is not an error.
    pub fn publish(&self, event: SceneEvent) {
        tracing::trace!(?event, subscribers = self.sender.receiver_count(), "Publishing scene event");
        let _ = self.sender.send(event);
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_without_subscribers() {
        let bus = EventBus::new();
        bus.publish(SceneEvent::Unloaded);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_every_subscriber_receives() {
        let bus = EventBus::new();
        let mut a = bus.subscribe();
        let mut b = bus.subscribe();
        bus.publish(SceneEvent::BuildingAdded { id: 3 });

        assert_eq!(a.try_recv().unwrap(), SceneEvent::BuildingAdded { id: 3 });
        assert_eq!(b.try_recv().unwrap(), SceneEvent::BuildingAdded { id: 3 });
        assert!(a.try_recv().is_err());
    }
}
