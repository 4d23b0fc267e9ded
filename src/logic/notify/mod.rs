//! Notify Module - Subscribers, Channels & Dispatch
//!
//! - `types` - Subscriber model, channel errors, delivery records
//! - `registry` - Read-only subscriber snapshots
//! - `channels` - `NotifyChannel` trait + WhatsApp/SMS implementations
//! - `dispatcher` - Ordered-fallback delivery with bounded history
//! - `message` - Alert body formatting

pub mod channels;
pub mod dispatcher;
pub mod message;
pub mod registry;
pub mod types;

pub use channels::{NotifyChannel, SmsChannel, WhatsAppChannel};
pub use dispatcher::NotificationDispatcher;
pub use registry::{InMemoryRegistry, JsonFileRegistry, SubscriberRegistry};
pub use types::{ChannelError, DeliveryAttempt, DeliveryOutcome, Subscriber};
