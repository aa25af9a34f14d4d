//! Card definitions for the board.

use crate::snap::GridPoint;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Default text for a freshly created task card.
pub const DEFAULT_TASK_TEXT: &str = "Task: [Add Task]";
/// Default text for a freshly created note card.
pub const DEFAULT_NOTE_TEXT: &str = "Note: [Add Note]";

/// Unique identifier for a card, of the form `card-<n>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    const PREFIX: &'static str = "card-";

    /// Build the id for sequence number `n`.
    pub fn from_sequence(n: u64) -> Self {
        Self(format!("{}{}", Self::PREFIX, n))
    }

    /// The sequence number encoded in the id, if it follows the `card-<n>` scheme.
    pub fn sequence(&self) -> Option<u64> {
        self.0.strip_prefix(Self::PREFIX)?.parse().ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for CardId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Hands out card ids from a monotonic counter.
///
/// Ids are never reused, even after the card that held one is deleted.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next id.
    pub fn next_id(&mut self) -> CardId {
        let id = CardId::from_sequence(self.next);
        self.next += 1;
        id
    }

    /// Make sure future ids sort after every id in `ids`.
    pub fn advance_past<'a>(&mut self, ids: impl IntoIterator<Item = &'a CardId>) {
        if let Some(max) = ids.into_iter().filter_map(CardId::sequence).max() {
            self.next = self.next.max(max + 1);
        }
    }
}

/// Completion percentage of a task card, always within 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Progress(u8);

impl Progress {
    pub const MAX: u8 = 100;

    /// Create a progress value, clamping into 0..=100.
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(0, Self::MAX as i64) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl<'de> Deserialize<'de> for Progress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Range inputs hand back strings, so older saves may hold "42" instead of 42.
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Float(f64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Int(n) => Ok(Progress::clamped(n)),
            Raw::Float(f) => Ok(Progress::clamped(f.round() as i64)),
            Raw::Text(s) => s
                .trim()
                .parse::<i64>()
                .map(Progress::clamped)
                .map_err(|_| serde::de::Error::custom(format!("invalid progress value: {s:?}"))),
        }
    }
}

/// Width and height of a card box in board units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardSize {
    pub width: u32,
    pub height: u32,
}

impl CardSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for CardSize {
    fn default() -> Self {
        Self::new(300, 250)
    }
}

/// Minimum and maximum box size a renderer should allow while resizing.
///
/// The board stores whatever size it is given; enforcing these bounds is
/// the renderer's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeConstraints {
    pub min: CardSize,
    pub max: CardSize,
}

impl Default for SizeConstraints {
    fn default() -> Self {
        Self {
            min: CardSize::new(250, 200),
            max: CardSize::new(400, 350),
        }
    }
}

impl SizeConstraints {
    /// Check that `min` does not exceed `max` on either axis.
    pub fn is_consistent(&self) -> bool {
        self.min.width <= self.max.width && self.min.height <= self.max.height
    }

    pub fn contains(&self, size: CardSize) -> bool {
        (self.min.width..=self.max.width).contains(&size.width)
            && (self.min.height..=self.max.height).contains(&size.height)
    }

    /// Clamp a requested size into the allowed range.
    pub fn clamp(&self, size: CardSize) -> CardSize {
        CardSize {
            width: size.width.clamp(self.min.width, self.max.width),
            height: size.height.clamp(self.min.height, self.max.height),
        }
    }
}

/// Card variant without payload, used to request a new card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    Task,
    Note,
}

impl CardType {
    pub fn default_text(self) -> &'static str {
        match self {
            CardType::Task => DEFAULT_TASK_TEXT,
            CardType::Note => DEFAULT_NOTE_TEXT,
        }
    }
}

/// Card variant. Only tasks carry progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CardKind {
    Task {
        #[serde(default)]
        progress: Progress,
    },
    Note,
}

impl CardKind {
    pub fn card_type(&self) -> CardType {
        match self {
            CardKind::Task { .. } => CardType::Task,
            CardKind::Note => CardType::Note,
        }
    }
}

impl From<CardType> for CardKind {
    fn from(card_type: CardType) -> Self {
        match card_type {
            CardType::Task => CardKind::Task {
                progress: Progress::default(),
            },
            CardType::Note => CardKind::Note,
        }
    }
}

/// A positioned, sized, text-bearing unit of content on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub text: String,
    pub position: GridPoint,
    pub size: CardSize,
    #[serde(flatten)]
    pub kind: CardKind,
}

impl Card {
    /// Create a card with the default text for its type.
    pub fn new(id: CardId, card_type: CardType, position: GridPoint, size: CardSize) -> Self {
        Self {
            id,
            text: card_type.default_text().to_string(),
            position,
            size,
            kind: card_type.into(),
        }
    }

    pub fn card_type(&self) -> CardType {
        self.kind.card_type()
    }

    pub fn is_task(&self) -> bool {
        matches!(self.kind, CardKind::Task { .. })
    }

    /// Progress of a task card, `None` for notes.
    pub fn progress(&self) -> Option<Progress> {
        match self.kind {
            CardKind::Task { progress } => Some(progress),
            CardKind::Note => None,
        }
    }
}
