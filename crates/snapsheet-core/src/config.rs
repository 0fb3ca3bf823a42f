use std::fmt;
use std::rc::Rc;

use smallvec::SmallVec;

use crate::animation::{Easing, TransitionSpec};

/// Settle, open and close duration used when none is configured.
pub const DEFAULT_SNAPPING_TIME_MS: u64 = 200;

/// Caller supplied configuration for one open/close session of a sheet.
///
/// `snaps` must hold at least one value. Every value is a percentage of the
/// viewport height in `[0, 100]`, with `0` meaning fully closed.
#[derive(Clone)]
pub struct SheetConfig {
    /// Heights the sheet may rest at.
    pub snaps: SmallVec<[f64; 4]>,
    /// Height the sheet opens to. Expected to be one of `snaps`.
    pub default_snap: f64,
    pub snapping_time_ms: u64,
    /// Close the sheet when a drag settles on `0`.
    pub close_on_snap_to_zero: bool,
    /// Freeze the document scroll while the sheet is open.
    pub lock_scroll: bool,
    /// Tags the history entry pushed on open, enabling back navigation dismissal.
    pub id: Option<String>,
    /// Extra classes for the sheet root.
    pub class_names: Vec<String>,
    pub easing: Easing,
    on_close: Rc<dyn Fn()>,
    on_snap: Option<Rc<dyn Fn(f64)>>,
}

impl SheetConfig {
    pub fn new(
        snaps: impl IntoIterator<Item = f64>,
        default_snap: f64,
        on_close: impl Fn() + 'static,
    ) -> Self {
        let snaps: SmallVec<[f64; 4]> = snaps.into_iter().collect();
        debug_assert!(!snaps.is_empty(), "a sheet needs at least one snap point");
        Self {
            snaps,
            default_snap,
            snapping_time_ms: DEFAULT_SNAPPING_TIME_MS,
            close_on_snap_to_zero: false,
            lock_scroll: true,
            id: None,
            class_names: Vec::new(),
            easing: Easing::default(),
            on_close: Rc::new(on_close),
            on_snap: None,
        }
    }

    pub fn with_snapping_time(mut self, millis: u64) -> Self {
        self.snapping_time_ms = millis;
        self
    }

    pub fn with_close_on_snap_to_zero(mut self, close: bool) -> Self {
        self.close_on_snap_to_zero = close;
        self
    }

    pub fn with_lock_scroll(mut self, lock: bool) -> Self {
        self.lock_scroll = lock;
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_names.push(class_name.into());
        self
    }

    pub fn with_class_names<I, S>(mut self, class_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.class_names
            .extend(class_names.into_iter().map(Into::into));
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Called with the resolved snap after every release or programmatic snap.
    pub fn on_snap(mut self, on_snap: impl Fn(f64) + 'static) -> Self {
        self.on_snap = Some(Rc::new(on_snap));
        self
    }

    /// Transition applied while the sheet settles, opens or closes.
    pub fn transition(&self) -> TransitionSpec {
        TransitionSpec::tween(self.snapping_time_ms, self.easing)
    }

    pub(crate) fn close_callback(&self) -> Rc<dyn Fn()> {
        Rc::clone(&self.on_close)
    }

    pub(crate) fn snap_callback(&self) -> Option<Rc<dyn Fn(f64)>> {
        self.on_snap.clone()
    }
}

impl fmt::Debug for SheetConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SheetConfig")
            .field("snaps", &self.snaps)
            .field("default_snap", &self.default_snap)
            .field("snapping_time_ms", &self.snapping_time_ms)
            .field("close_on_snap_to_zero", &self.close_on_snap_to_zero)
            .field("lock_scroll", &self.lock_scroll)
            .field("id", &self.id)
            .field("class_names", &self.class_names)
            .field("easing", &self.easing)
            .field("on_snap", &self.on_snap.is_some())
            .finish_non_exhaustive()
    }
}
