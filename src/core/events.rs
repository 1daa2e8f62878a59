use std::collections::HashMap;
use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::utils::date::serializer;

// DomainEventType defines type of event for domain changes
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub enum DomainEventType {
    Added,
    Updated,
    Deleted,
}

// DomainEvent records a state change of one aggregate, e.g. a borrowed book or an assessed fine.
// `group` names the aggregate (books, borrows, ...), `key` its identifier.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct DomainEvent {
    pub event_id: String,
    pub name: String,
    pub group: String,
    pub key: String,
    pub kind: DomainEventType,
    pub metadata: HashMap<String, String>,
    pub json_data: String,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
}

impl DomainEvent {
    pub fn added<T: Serialize>(name: &str, group: &str, key: &str, data: &T) -> serde_json::Result<Self> {
        Self::build(name, group, key, DomainEventType::Added, data)
    }

    pub fn updated<T: Serialize>(name: &str, group: &str, key: &str, data: &T) -> serde_json::Result<Self> {
        Self::build(name, group, key, DomainEventType::Updated, data)
    }

    pub fn deleted<T: Serialize>(name: &str, group: &str, key: &str, data: &T) -> serde_json::Result<Self> {
        Self::build(name, group, key, DomainEventType::Deleted, data)
    }

    pub fn with_metadata(mut self, key: &str, value: &str) -> Self {
        self.metadata.insert(key.to_string(), value.to_string());
        self
    }

    // topic name used by publishers that fan out per event name
    pub fn topic(&self) -> String {
        format!("bookhive-{}", self.name.replace('_', "-"))
    }

    fn build<T: Serialize>(name: &str, group: &str, key: &str, kind: DomainEventType, data: &T) -> serde_json::Result<Self> {
        Ok(DomainEvent {
            event_id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            group: group.to_string(),
            key: key.to_string(),
            kind,
            metadata: HashMap::new(),
            json_data: serde_json::to_string(data)?,
            created_at: Utc::now().naive_utc(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use crate::core::events::{DomainEvent, DomainEventType};

    #[tokio::test]
    async fn test_should_build_events_of_each_kind() {
        let data = HashMap::from([("copies", 2)]);
        let added = DomainEvent::added("book_added", "books", "b1", &data).expect("build event");
        let updated = DomainEvent::updated("book_updated", "books", "b1", &data).expect("build event");
        let deleted = DomainEvent::deleted("book_removed", "books", "b1", &data).expect("build event");
        assert_eq!(DomainEventType::Added, added.kind);
        assert_eq!(DomainEventType::Updated, updated.kind);
        assert_eq!(DomainEventType::Deleted, deleted.kind);
        assert_eq!("b1", deleted.key.as_str());
        assert_ne!(added.event_id, updated.event_id);
    }

    #[tokio::test]
    async fn test_should_attach_metadata_and_topic() {
        let event = DomainEvent::added("fine_assessed", "fines", "f1", &"1000".to_string())
            .expect("build event")
            .with_metadata("student_id", "s1");
        assert_eq!(Some(&"s1".to_string()), event.metadata.get("student_id"));
        assert_eq!("bookhive-fine-assessed", event.topic().as_str());
        assert_eq!("\"1000\"", event.json_data.as_str());
    }
}
