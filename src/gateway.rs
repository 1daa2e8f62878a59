pub mod ddb;
pub mod events;
pub mod factory;
pub mod memory;
pub mod sns;

#[derive(Debug, PartialEq, Clone, Copy)]
pub(crate) enum GatewayPublisherVia {
    Sns,
    LocalDynamoDB,
    InMemory,
}
