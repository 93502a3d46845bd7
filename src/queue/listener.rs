use async_channel::{Receiver, Sender};
use tracing::trace;

use crate::queue::NotificationItem;

/// Observer of queue lifecycle events, typically the rendering side.
///
/// Listeners run synchronously inside the queue operation that triggered
/// them and must not block.
pub trait QueueListener: Send + Sync + 'static {
    /// A new item was inserted. Sent before capacity eviction runs.
    fn on_start(&self, _item: &NotificationItem) {}

    /// An item became destroyed and left the queue.
    fn on_destroy(&self, _item: &NotificationItem) {}

    /// An item was clicked by the user.
    fn on_click(&self, _item: &NotificationItem) {}
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueueEvent {
    Start(NotificationItem),
    Destroy(NotificationItem),
    Click(NotificationItem),
}

/// Forwards lifecycle events to a channel, for consumers on another task.
pub struct ChannelListener {
    sender: Sender<QueueEvent>,
}

impl ChannelListener {
    pub fn new() -> (Self, Receiver<QueueEvent>) {
        let (sender, receiver) = async_channel::unbounded();
        (Self { sender }, receiver)
    }

    fn forward(&self, event: QueueEvent) {
        if self.sender.try_send(event).is_err() {
            trace!("queue event receiver is gone, dropping event");
        }
    }
}

impl QueueListener for ChannelListener {
    fn on_start(&self, item: &NotificationItem) {
        self.forward(QueueEvent::Start(item.clone()));
    }

    fn on_destroy(&self, item: &NotificationItem) {
        self.forward(QueueEvent::Destroy(item.clone()));
    }

    fn on_click(&self, item: &NotificationItem) {
        self.forward(QueueEvent::Click(item.clone()));
    }
}
