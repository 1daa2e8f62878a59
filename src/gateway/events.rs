use async_trait::async_trait;
use crate::core::events::DomainEvent;
use crate::core::library::LibraryError;

// EventPublisher forwards domain events once the state change is stored.
#[async_trait]
pub(crate) trait EventPublisher: Sync + Send {
    async fn create_topic(&self, topic: &str) -> Result<String, LibraryError>;
    async fn get_topics(&self) -> Result<Vec<String>, LibraryError>;
    async fn publish(&self, event: &DomainEvent) -> Result<(), LibraryError>;
}
