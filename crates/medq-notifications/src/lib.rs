pub mod adapters;
pub mod dispatcher;
pub mod error;
pub mod sink;
pub mod types;

pub use adapters::{HttpPushGateway, HttpSmsGateway};
pub use dispatcher::Dispatcher;
pub use error::NotificationError;
pub use sink::{HttpNotificationSink, NoopSink, NotificationSink, RecordingSink, SentMessage};
pub use types::{Notification, NotificationKind};
