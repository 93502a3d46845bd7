use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{timer::SlotKey, utils};

/// Identity of a notification, supplied by the caller or generated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NotificationId {
    Number(u64),
    Text(String),
}

impl NotificationId {
    pub(crate) fn generate() -> Self {
        NotificationId::Number(utils::next_id())
    }
}

impl From<u64> for NotificationId {
    fn from(id: u64) -> Self {
        NotificationId::Number(id)
    }
}

impl From<&str> for NotificationId {
    fn from(id: &str) -> Self {
        NotificationId::Text(id.to_string())
    }
}

impl From<String> for NotificationId {
    fn from(id: String) -> Self {
        NotificationId::Text(id)
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationId::Number(id) => write!(f, "{id}"),
            NotificationId::Text(id) => f.write_str(id),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemState {
    #[default]
    Idle,
    Destroyed,
}

/// One notification held by a queue.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotificationItem {
    pub id: NotificationId,
    /// Slot this item was created in. Snapshots of an item destroyed earlier
    /// keep their old key, so they never resolve to a later item reusing `id`.
    #[serde(skip)]
    pub(crate) key: SlotKey,
    pub title: Option<String>,
    pub text: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub group: String,
    pub state: ItemState,
    /// Animation duration in ms.
    pub speed: u64,
    /// Display duration in ms as resolved at creation. Negative: no timer.
    pub duration: i64,
    /// Total lifetime in ms: `duration + 2 * speed`.
    pub length: i64,
    pub data: Map<String, Value>,
    /// How many later requests were suppressed as copies of this one.
    pub duplicates: u32,
}

impl NotificationItem {
    pub fn is_active(&self) -> bool {
        self.state != ItemState::Destroyed
    }

    /// Whether the item is destroyed automatically once its lifetime ends.
    pub fn expires(&self) -> bool {
        self.duration >= 0
    }

    pub fn speed(&self) -> Duration {
        Duration::from_millis(self.speed)
    }

    /// Lifetime before auto-destroy, `None` for items kept until closed.
    pub fn lifetime(&self) -> Option<Duration> {
        if !self.expires() {
            return None;
        }
        u64::try_from(self.length).ok().map(Duration::from_millis)
    }

    pub(crate) fn is_copy_of(&self, title: &Option<String>, text: &Option<String>) -> bool {
        self.title == *title && self.text == *text
    }
}
