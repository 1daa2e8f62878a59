use async_trait::async_trait;
use lazy_static::lazy_static;
use parking_lot::RwLock;
use tracing::debug;
use crate::core::events::DomainEvent;
use crate::core::library::LibraryError;
use crate::gateway::events::EventPublisher;

lazy_static! {
    static ref PUBLISHED: RwLock<Vec<DomainEvent>> = RwLock::new(vec![]);
}

// MemoryPublisher keeps events in a process-wide log for the in-memory store.
#[derive(Debug, Default)]
pub struct MemoryPublisher {}

impl MemoryPublisher {
    pub(crate) fn new() -> Self {
        Self {}
    }
}

// published_events returns the events recorded for one aggregate, oldest first
pub(crate) fn published_events(group: &str, key: &str) -> Vec<DomainEvent> {
    PUBLISHED.read().iter()
        .filter(|e| e.group == group && e.key == key)
        .cloned()
        .collect()
}

#[async_trait]
impl EventPublisher for MemoryPublisher {
    async fn create_topic(&self, topic: &str) -> Result<String, LibraryError> {
        Ok(topic.to_string())
    }

    async fn get_topics(&self) -> Result<Vec<String>, LibraryError> {
        let mut topics: Vec<String> = PUBLISHED.read().iter().map(|e| e.topic()).collect();
        topics.sort();
        topics.dedup();
        Ok(topics)
    }

    async fn publish(&self, event: &DomainEvent) -> Result<(), LibraryError> {
        debug!("recording {} for {} {}", event.name, event.group, event.key);
        PUBLISHED.write().push(event.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::core::events::DomainEvent;
    use crate::gateway::events::EventPublisher;
    use crate::gateway::memory::publisher::{published_events, MemoryPublisher};

    #[tokio::test]
    async fn test_should_record_events_in_order() {
        let publisher = MemoryPublisher::new();
        let first = DomainEvent::added("borrow_added", "borrows", "memory-pub-1", &1).expect("build event");
        let second = DomainEvent::updated("borrow_returned", "borrows", "memory-pub-1", &2).expect("build event");
        publisher.publish(&first).await.expect("should publish");
        publisher.publish(&second).await.expect("should publish");
        let events = published_events("borrows", "memory-pub-1");
        assert_eq!(vec![first.event_id, second.event_id],
                   events.iter().map(|e| e.event_id.to_string()).collect::<Vec<String>>());
        let topics = publisher.get_topics().await.expect("should get topics");
        assert!(topics.contains(&"bookhive-borrow-returned".to_string()));
    }
}
