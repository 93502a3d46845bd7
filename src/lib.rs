//! A lifecycle queue for transient, auto-dismissing notifications.
//!
//! A [`Queue`] owns an ordered list of [`NotificationItem`]s and applies the
//! group filter, insertion order, duplicate suppression and capacity limit to
//! every add request. Each item that expires gets a pausable [`Timer`] which
//! destroys it once its lifetime has run. Rendering is left to whoever
//! subscribes a [`QueueListener`].
//!
//! ```no_run
//! use notiqueue::{Notifier, NotificationsOptions, Queue, QueueConfig};
//!
//! # async fn demo() {
//! let notifier = Notifier::default();
//! let mut queue = Queue::new(QueueConfig::default());
//! let commands = notifier.subscribe();
//! let server = tokio::spawn(async move { queue.run(commands).await });
//!
//! notifier
//!     .notify(NotificationsOptions::new().with_title("Saved").with_kind("success"))
//!     .ok();
//! drop(notifier);
//! server.await.ok();
//! # }
//! ```

pub mod config;
pub mod error;
pub mod queue;
pub mod timer;
mod utils;

pub use config::{HorizontalEdge, Position, QueueConfig, VerticalEdge, Width};
pub use error::{ConfigError, NotifyError};
pub use queue::{
    AddOutcome, ChannelListener, Command, ItemState, NotificationId, NotificationItem,
    NotificationsOptions, Notifier, Queue, QueueEvent, QueueListener, Rejection,
};
pub use timer::{Timer, TimerEvent};
