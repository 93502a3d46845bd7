use crate::{
    queue::{ItemState, NotificationItem},
    timer::{SlotKey, Timer},
};

/// An item in the backing collection, with the timer that owns its lifetime.
#[derive(Debug)]
pub(crate) struct Slot {
    pub(crate) item: NotificationItem,
    timer: Option<Timer>,
}

impl Slot {
    pub(crate) fn new(item: NotificationItem, timer: Option<Timer>) -> Self {
        Slot { item, timer }
    }

    pub(crate) fn key(&self) -> SlotKey {
        self.item.key
    }

    pub(crate) fn is_active(&self) -> bool {
        self.item.is_active()
    }

    /// Cancel the pending auto-destroy and mark the item destroyed.
    pub(crate) fn retire(&mut self) {
        if let Some(timer) = self.timer.as_mut() {
            timer.stop();
        }
        self.item.state = ItemState::Destroyed;
    }

    /// Returns false when the item has no timer.
    pub(crate) fn pause(&mut self) -> bool {
        match self.timer.as_mut() {
            Some(timer) => {
                timer.stop();
                true
            }
            None => false,
        }
    }

    /// Returns false when the item has no timer.
    pub(crate) fn resume(&mut self) -> bool {
        match self.timer.as_mut() {
            Some(timer) => {
                timer.start();
                true
            }
            None => false,
        }
    }

    pub(crate) fn timer(&self) -> Option<&Timer> {
        self.timer.as_ref()
    }
}
