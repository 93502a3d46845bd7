use std::{collections::VecDeque, sync::Arc, time::Duration};

use async_channel::{Receiver, Sender};
use tracing::{debug, trace};

use crate::{
    config::QueueConfig,
    queue::{
        ItemState, NotificationId, NotificationItem, NotificationsOptions, QueueListener,
        slot::Slot,
    },
    timer::{SlotKey, Timer, TimerEvent},
    utils,
};

/// Why an add request created nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The request targets another group.
    GroupMismatch,
    /// An item with the requested id is already held.
    IdInUse,
}

/// What an add request did to the queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added(NotificationId),
    /// Suppressed as a copy of the active item with this id.
    Duplicate(NotificationId),
    /// A clear request destroyed this many items.
    Cleared(usize),
    Rejected(Rejection),
}

impl AddOutcome {
    /// Id of the newly created item, if any.
    pub fn added(&self) -> Option<&NotificationId> {
        match self {
            AddOutcome::Added(id) => Some(id),
            _ => None,
        }
    }
}

/// Ordered collection of notifications and the policies applied to it.
///
/// The queue is the single owner of its items. Timers report expiry over a
/// channel and the queue applies it on its own task, through
/// [`Queue::process_expired`], [`Queue::next_expired`] or [`Queue::run`].
pub struct Queue {
    config: QueueConfig,
    /// Display order, front to back.
    slots: VecDeque<Slot>,
    listeners: Vec<Arc<dyn QueueListener>>,
    timer_sender: Sender<TimerEvent>,
    timer_receiver: Receiver<TimerEvent>,
}

impl Default for Queue {
    fn default() -> Self {
        Self::new(QueueConfig::default())
    }
}

impl Queue {
    pub fn new(config: QueueConfig) -> Self {
        let (timer_sender, timer_receiver) = async_channel::unbounded();
        Self {
            config,
            slots: VecDeque::new(),
            listeners: Vec::new(),
            timer_sender,
            timer_receiver,
        }
    }

    pub fn config(&self) -> &QueueConfig {
        &self.config
    }

    /// Register a listener. Listeners are notified in registration order.
    pub fn subscribe(&mut self, listener: Arc<dyn QueueListener>) {
        self.listeners.push(listener);
    }

    /// Handle an add request: create an item, bump a duplicate, or clear.
    ///
    /// Must be called inside a tokio runtime when the resolved duration is
    /// non-negative, since the new item's timer is armed right away.
    pub fn add_item(&mut self, request: NotificationsOptions) -> AddOutcome {
        let group = request.group.unwrap_or_default();
        if group != self.config.group {
            debug!(
                group = %group,
                expected = %self.config.group,
                "ignoring request for another group"
            );
            return AddOutcome::Rejected(Rejection::GroupMismatch);
        }

        if request.clear {
            return AddOutcome::Cleared(self.destroy_all());
        }

        let duration = request.duration.unwrap_or(self.config.duration);
        let speed = request.speed.unwrap_or(self.config.speed);
        let ignore_duplicates = request
            .ignore_duplicates
            .unwrap_or(self.config.ignore_duplicates);

        if ignore_duplicates {
            if let Some(slot) = self.slots.iter_mut().find(|slot| {
                slot.is_active() && slot.item.is_copy_of(&request.title, &request.text)
            }) {
                slot.item.duplicates += 1;
                debug!(
                    id = %slot.item.id,
                    duplicates = slot.item.duplicates,
                    "suppressed duplicate notification"
                );
                return AddOutcome::Duplicate(slot.item.id.clone());
            }
        }

        let id = match request.id {
            Some(id) if self.contains(&id) => {
                debug!(%id, "notification id already in use");
                return AddOutcome::Rejected(Rejection::IdInUse);
            }
            Some(id) => id,
            None => self.generate_id(),
        };

        let speed_ms = i64::try_from(speed).unwrap_or(i64::MAX);
        let length = duration.saturating_add(speed_ms.saturating_mul(2));
        let key = utils::next_slot_key();
        let timer = (duration >= 0).then(|| self.expiry_timer(key, id.clone(), length));

        let item = NotificationItem {
            id: id.clone(),
            key,
            title: request.title,
            text: request.text,
            kind: request.kind,
            group,
            state: ItemState::Idle,
            speed,
            duration,
            length,
            data: request.data.unwrap_or_default(),
            duplicates: 0,
        };

        let append = self.config.reverse != self.config.position.is_bottom();
        let slot = Slot::new(item, timer);
        if append {
            self.slots.push_back(slot);
        } else {
            self.slots.push_front(slot);
        }
        trace!(%id, length, append, "added notification");

        let inserted = if append {
            self.slots.back()
        } else {
            self.slots.front()
        };
        if let Some(slot) = inserted {
            for listener in &self.listeners {
                listener.on_start(&slot.item);
            }
        }

        self.enforce_capacity(append);
        AddOutcome::Added(id)
    }

    /// Destroy `item` if it is still held.
    ///
    /// A snapshot of an item that is already gone does nothing, even when a
    /// newer item has taken over its id.
    pub fn destroy(&mut self, item: &NotificationItem) -> bool {
        self.destroy_slot(item.key)
    }

    /// Destroy the item with this id. Unknown ids are ignored.
    ///
    /// Returns whether an active item was destroyed.
    pub fn destroy_by_id(&mut self, id: &NotificationId) -> bool {
        match self.slots.iter().find(|slot| slot.item.id == *id) {
            Some(slot) => {
                let key = slot.key();
                self.destroy_slot(key)
            }
            None => {
                debug!(%id, "no notification to destroy");
                false
            }
        }
    }

    /// Destroy every active item. Returns how many were destroyed.
    pub fn destroy_all(&mut self) -> usize {
        let mut destroyed = Vec::new();
        for slot in self.slots.iter_mut().filter(|slot| slot.is_active()) {
            slot.retire();
            destroyed.push(slot.item.clone());
        }
        self.cleanup();

        for item in &destroyed {
            for listener in &self.listeners {
                listener.on_destroy(item);
            }
        }
        trace!(count = destroyed.len(), "destroyed all notifications");
        destroyed.len()
    }

    /// Freeze the countdown of an item. Returns false if it has no timer.
    pub fn pause(&mut self, id: &NotificationId) -> bool {
        self.active_slot_mut(id).is_some_and(Slot::pause)
    }

    /// Continue the countdown of an item. Returns false if it has no timer.
    pub fn resume(&mut self, id: &NotificationId) -> bool {
        self.active_slot_mut(id).is_some_and(Slot::resume)
    }

    /// Report a click on an item, closing it when `close_on_click` is set.
    pub fn click(&mut self, id: &NotificationId) -> bool {
        let Some(slot) = self.active_slot_mut(id) else {
            return false;
        };
        let key = slot.key();
        let item = slot.item.clone();

        for listener in &self.listeners {
            listener.on_click(&item);
        }
        if self.config.close_on_click {
            self.destroy_slot(key);
        }
        true
    }

    /// Pointer entered an item. Pauses it when `pause_on_hover` is set.
    pub fn hover_start(&mut self, id: &NotificationId) -> bool {
        self.config.pause_on_hover && self.pause(id)
    }

    /// Pointer left an item. Resumes it when `pause_on_hover` is set.
    pub fn hover_end(&mut self, id: &NotificationId) -> bool {
        self.config.pause_on_hover && self.resume(id)
    }

    /// Active items in display order.
    pub fn active(&self) -> impl Iterator<Item = &NotificationItem> {
        self.slots
            .iter()
            .filter(|slot| slot.is_active())
            .map(|slot| &slot.item)
    }

    pub fn get(&self, id: &NotificationId) -> Option<&NotificationItem> {
        self.active().find(|item| item.id == *id)
    }

    /// Running time left before an item is destroyed automatically.
    pub fn remaining(&self, id: &NotificationId) -> Option<Duration> {
        self.slots
            .iter()
            .find(|slot| slot.is_active() && slot.item.id == *id)
            .and_then(Slot::timer)
            .and_then(Timer::remaining)
    }

    /// Number of active items.
    pub fn len(&self) -> usize {
        self.active().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Apply a timer event. Returns whether an item was destroyed.
    pub fn handle_timer_event(&mut self, event: TimerEvent) -> bool {
        match event {
            TimerEvent::Expired { key, id } => {
                trace!(%id, "notification expired");
                self.destroy_slot(key)
            }
        }
    }

    /// Apply every expiry that is already pending, without waiting.
    ///
    /// Returns the number of items destroyed.
    pub fn process_expired(&mut self) -> usize {
        let mut destroyed = 0;
        while let Ok(event) = self.timer_receiver.try_recv() {
            if self.handle_timer_event(event) {
                destroyed += 1;
            }
        }
        destroyed
    }

    /// Wait for the next item to expire and destroy it.
    pub async fn next_expired(&mut self) -> Option<NotificationId> {
        loop {
            let event = self.timer_receiver.recv().await.ok()?;
            let TimerEvent::Expired { id, .. } = &event;
            let id = id.clone();
            if self.handle_timer_event(event) {
                return Some(id);
            }
        }
    }

    pub(crate) fn timer_events(&self) -> Receiver<TimerEvent> {
        self.timer_receiver.clone()
    }

    fn contains(&self, id: &NotificationId) -> bool {
        self.slots.iter().any(|slot| slot.item.id == *id)
    }

    fn generate_id(&self) -> NotificationId {
        loop {
            let id = NotificationId::generate();
            if !self.contains(&id) {
                return id;
            }
        }
    }

    fn active_slot_mut(&mut self, id: &NotificationId) -> Option<&mut Slot> {
        self.slots
            .iter_mut()
            .find(|slot| slot.is_active() && slot.item.id == *id)
    }

    fn expiry_timer(&self, key: SlotKey, id: NotificationId, length: i64) -> Timer {
        let sender = self.timer_sender.clone();
        Timer::new(
            move || {
                let event = TimerEvent::Expired {
                    key,
                    id: id.clone(),
                };
                if sender.try_send(event).is_err() {
                    trace!(%id, "queue dropped before notification expired");
                }
            },
            length,
        )
    }

    /// Evict one item from the edge opposite to the last insertion.
    fn enforce_capacity(&mut self, appended: bool) {
        let Some(max) = self.config.max else {
            return;
        };
        if self.len() <= max {
            return;
        }

        let mut active = self.slots.iter().filter(|slot| slot.is_active());
        let victim = if appended {
            active.next()
        } else {
            active.last()
        };
        if let Some(slot) = victim {
            let key = slot.key();
            debug!(id = %slot.item.id, max, "evicting notification over capacity");
            self.destroy_slot(key);
        }
    }

    fn destroy_slot(&mut self, key: SlotKey) -> bool {
        let Some(slot) = self
            .slots
            .iter_mut()
            .find(|slot| slot.is_active() && slot.key() == key)
        else {
            return false;
        };

        slot.retire();
        let item = slot.item.clone();
        self.cleanup();
        trace!(id = %item.id, "destroyed notification");

        for listener in &self.listeners {
            listener.on_destroy(&item);
        }
        true
    }

    /// Drop destroyed items from the backing collection.
    fn cleanup(&mut self) {
        self.slots.retain(Slot::is_active);
    }
}
