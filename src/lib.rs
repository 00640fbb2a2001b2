//! Administrative-operation client core for Kafka-compatible brokers.
//!
//! This crate implements the admin surface of a broker client: batched
//! topic creation and deletion, partition count changes, and resource
//! configuration alteration and description. Each submitted batch yields
//! exactly one batch of per-target outcomes, positionally aligned with the
//! submitted specs, in which items succeed and fail independently.
//!
//! The crate deliberately stops at a narrow seam: the wire protocol, broker
//! connections, and leader discovery live behind the
//! [`AdminTransport`](client::AdminTransport) trait. The
//! [`AdminClient`](admin::AdminClient) owns request validation, option
//! handling, and completion delivery, and works with any transport
//! implementation.

pub mod admin;
pub mod client;
pub mod config;
pub mod confval;
pub mod error;
mod log;
pub mod util;

pub use crate::config::ClientConfig;
pub use crate::error::{ErrorCode, KafkaError, KafkaResult};
pub use crate::util::Timeout;
