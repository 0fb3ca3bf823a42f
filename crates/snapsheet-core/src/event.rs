//! Platform independent input payloads delivered to the sheet.

use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    Cancel,
}

/// A pointer or touch sample.
///
/// Touch events carry the page coordinates of every active touch point; mouse
/// and pointer events only carry their own coordinate.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerInput {
    pub kind: PointerEventKind,
    /// Vertical page coordinate of the event itself.
    pub page_y: f64,
    /// Vertical page coordinates of the active touch points, if any.
    pub touches: SmallVec<[f64; 2]>,
}

impl PointerInput {
    pub fn pointer(kind: PointerEventKind, page_y: f64) -> Self {
        Self {
            kind,
            page_y,
            touches: SmallVec::new(),
        }
    }

    pub fn touch(kind: PointerEventKind, touches: impl IntoIterator<Item = f64>) -> Self {
        let touches: SmallVec<[f64; 2]> = touches.into_iter().collect();
        Self {
            kind,
            page_y: touches.first().copied().unwrap_or_default(),
            touches,
        }
    }

    /// The coordinate a drag follows: the first touch point when present,
    /// otherwise the event's own coordinate.
    pub fn position_y(&self) -> f64 {
        self.touches.first().copied().unwrap_or(self.page_y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEventType {
    KeyDown,
    KeyUp,
}

/// Keyboard event reduced to what dismissal needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    /// Key name as reported by the platform, e.g. `"Escape"`.
    pub key: String,
    pub event_type: KeyEventType,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>, event_type: KeyEventType) -> Self {
        Self {
            key: key.into(),
            event_type,
        }
    }

    pub fn key_up(key: impl Into<String>) -> Self {
        Self::new(key, KeyEventType::KeyUp)
    }

    /// `"Esc"` is what older browsers report for the escape key.
    pub fn is_escape(&self) -> bool {
        matches!(self.key.as_str(), "Escape" | "Esc")
    }

    /// Whether this event asks an open sheet to dismiss itself.
    pub fn is_dismissal(&self) -> bool {
        self.event_type == KeyEventType::KeyUp && self.is_escape()
    }
}
