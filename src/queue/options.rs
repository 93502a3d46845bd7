use serde::Deserialize;
use serde_json::{Map, Value};

use crate::queue::NotificationId;

/// A request to show a notification, as delivered by the `add` event.
///
/// Omitted `duration`, `speed` and `ignore_duplicates` fall back to the
/// queue configuration. Setting `clear` (alias `clean`) destroys every
/// active item instead of adding one. A document may carry only one of the
/// two spellings; `{ "clear": true, "clean": true }` is a duplicate field
/// error.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NotificationsOptions {
    pub id: Option<NotificationId>,
    pub title: Option<String>,
    pub text: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub group: Option<String>,
    pub data: Option<Map<String, Value>>,
    pub duration: Option<i64>,
    pub speed: Option<u64>,
    pub ignore_duplicates: Option<bool>,
    #[serde(alias = "clean")]
    pub clear: bool,
}

impl NotificationsOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// A request that destroys every active item of the target group.
    pub fn clear() -> Self {
        Self {
            clear: true,
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<NotificationId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn with_data(mut self, data: Map<String, Value>) -> Self {
        self.data = Some(data);
        self
    }

    /// Display duration in ms, negative to keep the item until closed.
    pub fn with_duration(mut self, duration_ms: i64) -> Self {
        self.duration = Some(duration_ms);
        self
    }

    pub fn with_speed(mut self, speed_ms: u64) -> Self {
        self.speed = Some(speed_ms);
        self
    }

    pub fn with_ignore_duplicates(mut self, ignore: bool) -> Self {
        self.ignore_duplicates = Some(ignore);
        self
    }
}

/// A bare message becomes a notification with that text and an empty title.
impl From<&str> for NotificationsOptions {
    fn from(text: &str) -> Self {
        Self::new().with_title("").with_text(text)
    }
}

impl From<String> for NotificationsOptions {
    fn from(text: String) -> Self {
        Self::new().with_title("").with_text(text)
    }
}
