use std::fmt;
use std::rc::Rc;

use log::debug;

use crate::platform::ScrollHost;

/// Freezes the document scroll while a sheet is open.
///
/// The engaged marker lives on the shared [`ScrollHost`], so a second lock on
/// the same document will not engage on top of the first. Each lock only
/// releases what it engaged itself: the recorded offset is `Some` exactly while
/// this instance holds the lock.
pub struct ViewportLock {
    host: Rc<dyn ScrollHost>,
    enabled: bool,
    saved_offset: Option<f64>,
}

impl ViewportLock {
    pub fn new(host: Rc<dyn ScrollHost>, enabled: bool) -> Self {
        Self {
            host,
            enabled,
            saved_offset: None,
        }
    }

    /// Whether this instance currently holds the lock.
    pub fn is_held(&self) -> bool {
        self.saved_offset.is_some()
    }

    /// Engages the lock, returning whether it did.
    ///
    /// Nothing happens when locking is disabled, when the document fits the
    /// viewport, or when a lock is already engaged on the document.
    pub fn engage(&mut self) -> bool {
        if !self.enabled || self.host.is_lock_marked() {
            return false;
        }
        if self.host.content_height() <= self.host.viewport_height() {
            return false;
        }
        let offset = self.host.scroll_offset();
        self.host.set_visual_offset(Some(-offset));
        self.host.set_lock_marked(true);
        self.saved_offset = Some(offset);
        debug!("scroll lock engaged at offset {offset}");
        true
    }

    /// Releases the lock and restores the recorded scroll position, returning
    /// whether anything was released. Safe to call when not engaged.
    pub fn disengage(&mut self) -> bool {
        if !self.enabled {
            return false;
        }
        let Some(offset) = self.saved_offset.take() else {
            return false;
        };
        self.host.set_visual_offset(None);
        if !self.host.is_lock_marked() {
            return false;
        }
        self.host.set_lock_marked(false);
        self.host.scroll_to(offset);
        debug!("scroll lock released, restored offset {offset}");
        true
    }
}

impl fmt::Debug for ViewportLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewportLock")
            .field("enabled", &self.enabled)
            .field("saved_offset", &self.saved_offset)
            .finish_non_exhaustive()
    }
}
