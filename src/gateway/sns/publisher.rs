use std::collections::HashMap;
use aws_sdk_sns::Client;
use async_trait::async_trait;
use aws_sdk_sns::error::SdkError;
use aws_sdk_sns::operation::create_topic::CreateTopicError;
use aws_sdk_sns::operation::list_topics::ListTopicsError;
use aws_sdk_sns::operation::publish::PublishError;
use parking_lot::Mutex;
use tracing::info;
use crate::core::events::DomainEvent;
use crate::core::library::LibraryError;
use crate::gateway::events::EventPublisher;

// SNSPublisher sends each event to the topic of its name, creating the topic on first use.
#[derive(Debug)]
pub struct SNSPublisher {
    client: Client,
    topics: Mutex<HashMap<String, String>>,
}

impl SNSPublisher {
    pub(crate) fn new(client: Client) -> Self {
        Self {
            client,
            topics: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl EventPublisher for SNSPublisher {
    // create_topic is idempotent in SNS and returns the existing ARN for a known name
    async fn create_topic(&self, topic: &str) -> Result<String, LibraryError> {
        let resp = self.client.create_topic().name(topic).send().await?;
        let arn = resp.topic_arn().unwrap_or_default().to_string();
        self.topics.lock().insert(topic.to_string(), arn.to_string());
        info!("Created topic with ARN: {}", arn);
        Ok(arn)
    }

    async fn get_topics(&self) -> Result<Vec<String>, LibraryError> {
        let mut topics = vec![];
        let resp = self.client.list_topics().send().await?;
        for topic in resp.topics().unwrap_or_default() {
            topics.push(topic.topic_arn().unwrap_or_default().to_string());
        }
        Ok(topics)
    }

    async fn publish(&self, event: &DomainEvent) -> Result<(), LibraryError> {
        let topic = event.topic();
        let cached = self.topics.lock().get(topic.as_str()).cloned();
        let arn = match cached {
            Some(arn) => arn,
            None => self.create_topic(topic.as_str()).await?,
        };
        let json = serde_json::to_string(event)?;
        self.client.publish().topic_arn(arn).message(json).send().await?;
        Ok(())
    }
}

impl From<SdkError<CreateTopicError>> for LibraryError {
    fn from(err: SdkError<CreateTopicError>) -> Self {
        LibraryError::runtime(format!("{:?}", err).as_str(), None)
    }
}

impl From<SdkError<ListTopicsError>> for LibraryError {
    fn from(err: SdkError<ListTopicsError>) -> Self {
        LibraryError::runtime(format!("{:?}", err).as_str(), None)
    }
}

impl From<SdkError<PublishError>> for LibraryError {
    fn from(err: SdkError<PublishError>) -> Self {
        LibraryError::runtime(format!("{:?}", err).as_str(), None)
    }
}

#[cfg(test)]
mod tests {
    use crate::core::events::DomainEvent;
    use crate::gateway::{factory, GatewayPublisherVia};

    #[tokio::test]
    #[ignore = "requires AWS credentials for SNS"]
    async fn test_should_publish_to_sns() {
        let event = DomainEvent::added("book_added", "books", "b1", &"Dune".to_string()).expect("build event");
        let publisher = factory::create_publisher(GatewayPublisherVia::Sns).await;
        let arn = publisher.create_topic(event.topic().as_str()).await.expect("should create topic");
        publisher.publish(&event).await.expect("should publish");
        let topics = publisher.get_topics().await.expect("should get topics");
        assert!(topics.contains(&arn));
    }
}
