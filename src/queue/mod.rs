pub mod driver;
pub mod item;
pub mod listener;
pub mod options;
pub mod queue;
pub(crate) mod slot;


pub use driver::{Command, DEFAULT_BUS_CAPACITY, Notifier};
pub use item::{ItemState, NotificationId, NotificationItem};
pub use listener::{ChannelListener, QueueEvent, QueueListener};
pub use options::NotificationsOptions;
pub use queue::{AddOutcome, Queue, Rejection};
