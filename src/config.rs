//! Queue configuration.
//!
//! Every field has a default, so an empty document is a valid config. Keys are
//! camelCase (`ignoreDuplicates`, `closeOnClick`, ...) in both TOML and JSON.

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::ConfigError;

pub const DEFAULT_SPEED_MS: u64 = 300;
pub const DEFAULT_DURATION_MS: i64 = 3000;
pub const DEFAULT_WIDTH_PX: f64 = 300.0;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QueueConfig {
    /// Only requests carrying this group are accepted.
    pub group: String,
    pub width: Width,
    /// Flip the insertion edge implied by `position`.
    pub reverse: bool,
    pub position: Position,
    /// Animation duration in ms, reserved twice in every item lifetime.
    pub speed: u64,
    /// Display duration in ms. Negative keeps items until destroyed.
    pub duration: i64,
    /// Animation delay in ms, for the rendering side.
    pub delay: u64,
    /// Maximum number of active items. `None` is unbounded.
    pub max: Option<usize>,
    pub ignore_duplicates: bool,
    pub close_on_click: bool,
    pub pause_on_hover: bool,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            group: String::new(),
            width: Width::default(),
            reverse: false,
            position: Position::default(),
            speed: DEFAULT_SPEED_MS,
            duration: DEFAULT_DURATION_MS,
            delay: 0,
            max: None,
            ignore_duplicates: false,
            close_on_click: true,
            pause_on_hover: false,
        }
    }
}

impl QueueConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load a config file: JSON for `.json` files, TOML for anything else.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&content),
            _ => Self::from_toml_str(&content),
        }
    }
}

/// Toast width, either a pixel count or any CSS length (`"50%"`, `"20rem"`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Width {
    Pixels(f64),
    Css(String),
}

impl Default for Width {
    fn default() -> Self {
        Width::Pixels(DEFAULT_WIDTH_PX)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum VerticalEdge {
    #[default]
    Top,
    Bottom,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalEdge {
    Left,
    Center,
    #[default]
    Right,
}

/// Screen corner the notification stack is anchored to.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "PositionRepr")]
pub struct Position {
    pub vertical: VerticalEdge,
    pub horizontal: HorizontalEdge,
}

impl Position {
    pub fn new(vertical: VerticalEdge, horizontal: HorizontalEdge) -> Self {
        Self {
            vertical,
            horizontal,
        }
    }

    /// Parse a space separated position such as `"bottom left"`.
    pub fn parse(s: &str) -> Self {
        Self::from_words(s.split_whitespace())
    }

    /// Build a position from words. The last word naming an axis wins, words
    /// naming neither axis are ignored, and missing axes keep their default.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut position = Position::default();
        for word in words {
            match word.as_ref() {
                "top" => position.vertical = VerticalEdge::Top,
                "bottom" => position.vertical = VerticalEdge::Bottom,
                "left" => position.horizontal = HorizontalEdge::Left,
                "center" => position.horizontal = HorizontalEdge::Center,
                "right" => position.horizontal = HorizontalEdge::Right,
                other => debug!(word = other, "ignoring unknown position word"),
            }
        }
        position
    }

    /// Whether new items enter the stack at its bottom edge.
    pub fn is_bottom(&self) -> bool {
        self.vertical == VerticalEdge::Bottom
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PositionRepr {
    Words(String),
    List(Vec<String>),
}

impl From<PositionRepr> for Position {
    fn from(repr: PositionRepr) -> Self {
        match repr {
            PositionRepr::Words(s) => Position::parse(&s),
            PositionRepr::List(words) => Position::from_words(words),
        }
    }
}
