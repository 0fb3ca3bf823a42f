use crate::snap::{CLOSED_HEIGHT, FULL_HEIGHT};

/// Converts vertical pointer travel into a running sheet height.
///
/// The anchor is the last pointer coordinate seen during a drag and is `Some`
/// exactly while a drag is in progress. Heights are percentages of the viewport
/// and always stay within `[0, 100]`.
#[derive(Clone, Debug, PartialEq)]
pub struct GestureTracker {
    anchor: Option<f64>,
    height: f64,
}

impl GestureTracker {
    pub fn new(height: f64) -> Self {
        Self {
            anchor: None,
            height: clamp_height(height),
        }
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn set_height(&mut self, height: f64) {
        self.height = clamp_height(height);
    }

    pub fn anchor(&self) -> Option<f64> {
        self.anchor
    }

    pub fn is_dragging(&self) -> bool {
        self.anchor.is_some()
    }

    pub fn start(&mut self, pointer_y: f64) {
        self.anchor = Some(pointer_y);
    }

    /// Follows the pointer to `pointer_y` and returns the new height, or `None`
    /// when no drag is active.
    ///
    /// Moving the pointer up grows the sheet. A non-positive viewport height
    /// leaves the height untouched but still advances the anchor.
    pub fn drag_to(&mut self, pointer_y: f64, viewport_height: f64) -> Option<f64> {
        let anchor = self.anchor?;
        if viewport_height > 0.0 {
            let delta_y = anchor - pointer_y;
            let delta_height = delta_y / viewport_height * FULL_HEIGHT;
            self.height = clamp_height(self.height + delta_height);
        }
        self.anchor = Some(pointer_y);
        Some(self.height)
    }

    /// Ends the drag, returning whether one was in progress.
    pub fn release(&mut self) -> bool {
        self.anchor.take().is_some()
    }
}

impl Default for GestureTracker {
    fn default() -> Self {
        Self::new(CLOSED_HEIGHT)
    }
}

fn clamp_height(height: f64) -> f64 {
    height.clamp(CLOSED_HEIGHT, FULL_HEIGHT)
}
