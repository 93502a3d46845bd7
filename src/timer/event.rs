use crate::queue::NotificationId;

/// Serial number of a queue slot. Unique for the life of the process.
pub type SlotKey = u64;

/// Events sent by item timers back to the queue that owns them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    /// The lifetime of the item in slot `key` ran out.
    Expired { key: SlotKey, id: NotificationId },
}
