use super::event::EventType;
use super::types::ProductType;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// Rejected at startup, before any event is scheduled.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// Extraction from an empty queue. The driver loop guards against this.
    #[error("Attempted to extract an event from an empty queue")]
    EmptyQueue,
    #[error("Invalid product type {product_type:?} on {event_type} event")]
    InvalidProductType {
        event_type: EventType,
        product_type: Option<ProductType>,
    },
    #[error("Invalid distribution parameters: {0}")]
    InvalidDistribution(String),
}
