//! The sheet controller: gesture tracking, settling and the open/close
//! lifecycle.
//!
//! State lives in a single `Rc<RefCell<SheetInner>>`. Window listeners and
//! delayed tasks only hold weak references to it, so a torn down sheet is never
//! mutated by a late callback. Caller callbacks (`on_snap`, `on_close`) are
//! always invoked after the state borrow is released, which lets them call back
//! into the sheet.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use log::{debug, trace};

use crate::config::SheetConfig;
use crate::event::{KeyEvent, PointerEventKind, PointerInput};
use crate::gesture::GestureTracker;
use crate::platform::{SheetEnvironment, WindowListener};
use crate::scroll_lock::ViewportLock;
use crate::snap::{is_shown, nearest_snap, CLOSED_HEIGHT, FULL_HEIGHT};
use crate::task::DelayedTask;
use crate::url::{canonical_url, sheet_url};

/// Lifecycle of a sheet.
///
/// `Closed → Opening → Open → Closing → Closed`. Dragging is tracked
/// separately (see [`BottomSheet::is_dragging`]) and can happen while
/// `Opening` or `Open`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SheetPhase {
    Closed,
    /// Animating to the default snap.
    Opening,
    Open,
    /// Animating to zero; `on_close` fires when this ends.
    Closing,
}

impl SheetPhase {
    /// Whether the sheet accepts gestures and dismissal.
    pub fn is_active(self) -> bool {
        matches!(self, SheetPhase::Opening | SheetPhase::Open)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SettleOrigin {
    Gesture,
    Programmatic,
}

#[derive(Clone, Copy, Debug)]
struct Settled {
    resolved: f64,
    /// A drag released at zero with `close_on_snap_to_zero` set.
    auto_close: bool,
}

type SharedInner = Rc<RefCell<SheetInner>>;
type WeakInner = Weak<RefCell<SheetInner>>;

struct SheetInner {
    config: SheetConfig,
    env: SheetEnvironment,
    phase: SheetPhase,
    gesture: GestureTracker,
    lock: ViewportLock,
    open_task: Option<DelayedTask>,
    settle_task: Option<DelayedTask>,
    close_task: Option<DelayedTask>,
}

impl SheetInner {
    fn new(config: SheetConfig, env: SheetEnvironment) -> Self {
        let lock = ViewportLock::new(Rc::clone(&env.scroll), config.lock_scroll);
        Self {
            config,
            env,
            phase: SheetPhase::Closed,
            gesture: GestureTracker::default(),
            lock,
            open_task: None,
            settle_task: None,
            close_task: None,
        }
    }

    fn transition_css(&self) -> String {
        self.config.transition().css()
    }

    fn open(&mut self, weak: WeakInner) {
        let default_snap = self.config.default_snap;
        self.gesture = GestureTracker::new(default_snap);

        let transition = self.transition_css();
        let surface = Rc::clone(&self.env.surface);
        surface.set_overlay_visible(true);
        surface.set_transition(Some(&transition));
        surface.set_height(self.gesture.height());

        if let Some(id) = &self.config.id {
            let url = sheet_url(&self.env.navigator.current_url(), id);
            self.env.navigator.push_url(&url);
        }

        for listener in WindowListener::ALL {
            self.env.listeners.attach(
                listener,
                SheetHandle {
                    inner: weak.clone(),
                },
            );
        }

        self.open_task = Some(DelayedTask::schedule(
            &self.env.scheduler,
            self.config.snapping_time_ms,
            move || {
                if let Some(inner) = weak.upgrade() {
                    inner.borrow_mut().finish_open();
                }
            },
        ));

        self.lock.engage();
        self.phase = SheetPhase::Opening;
        debug!("sheet opening to {default_snap}%");
    }

    fn finish_open(&mut self) {
        self.open_task = None;
        if self.phase != SheetPhase::Opening {
            return;
        }
        // A release during the opening animation owns the transition now.
        if self.settle_task.is_none() {
            self.env.surface.set_transition(None);
        }
        self.phase = SheetPhase::Open;
        trace!("sheet open");
    }

    fn start_drag(&mut self, pointer_y: f64) {
        if !self.phase.is_active() {
            return;
        }
        self.gesture.start(pointer_y);
        self.env.surface.set_grabbing(true);
        self.env.surface.set_fullscreen(false);
        trace!("drag started at y={pointer_y}");
    }

    fn track(&mut self, pointer_y: f64) {
        if self.gesture.height() != FULL_HEIGHT {
            self.env.surface.set_fullscreen(false);
        }
        let viewport_height = self.env.scroll.viewport_height();
        let Some(height) = self.gesture.drag_to(pointer_y, viewport_height) else {
            return;
        };
        self.env.surface.set_height(height);
        trace!("sheet dragged to {height:.2}%");
        if height == FULL_HEIGHT {
            self.env.surface.set_fullscreen(true);
        }
    }

    /// Moves the sheet to the snap nearest `target` (or the live height).
    ///
    /// The caller reports the snap and, when [`Settled::auto_close`] is set,
    /// starts the close sequence afterwards.
    fn settle(&mut self, weak: WeakInner, target: Option<f64>, origin: SettleOrigin) -> Option<Settled> {
        if !self.phase.is_active() {
            self.gesture.release();
            return None;
        }
        let was_dragging = self.gesture.is_dragging();
        let transition = self.transition_css();
        let surface = Rc::clone(&self.env.surface);
        surface.set_transition(Some(&transition));
        surface.set_grabbing(false);

        let resolved = nearest_snap(
            &self.config.snaps,
            target.unwrap_or_else(|| self.gesture.height()),
        );
        self.gesture.set_height(resolved);
        surface.set_height(self.gesture.height());
        surface.set_fullscreen(resolved == FULL_HEIGHT);
        debug!("sheet settled on {resolved}% ({origin:?})");

        let auto_close = origin == SettleOrigin::Gesture
            && was_dragging
            && self.config.close_on_snap_to_zero
            && !is_shown(resolved);
        self.gesture.release();

        // The close sequence replaces the settle timer.
        if !auto_close {
            self.settle_task = Some(DelayedTask::schedule(
                &self.env.scheduler,
                self.config.snapping_time_ms,
                move || {
                    if let Some(inner) = weak.upgrade() {
                        inner.borrow_mut().finish_settle();
                    }
                },
            ));
        }
        Some(Settled {
            resolved,
            auto_close,
        })
    }

    fn finish_settle(&mut self) {
        self.settle_task = None;
        if self.phase.is_active() && self.open_task.is_none() {
            self.env.surface.set_transition(None);
        }
    }

    /// Starts the close animation. Returns `false` when a close is already
    /// running or the sheet is not open.
    fn begin_close(&mut self, weak: WeakInner) -> bool {
        if !self.phase.is_active() {
            trace!("close ignored while {:?}", self.phase);
            return false;
        }
        self.phase = SheetPhase::Closing;
        self.gesture.release();
        self.open_task = None;
        self.settle_task = None;

        let transition = self.transition_css();
        let surface = Rc::clone(&self.env.surface);
        surface.set_grabbing(false);
        surface.set_transition(Some(&transition));
        surface.set_height(CLOSED_HEIGHT);
        surface.set_fullscreen(false);
        self.gesture.set_height(CLOSED_HEIGHT);
        surface.set_overlay_visible(false);

        self.lock.disengage();

        let url = canonical_url(&self.env.navigator.current_url()).to_owned();
        self.env.navigator.replace_url(&url);

        self.close_task = Some(DelayedTask::schedule(
            &self.env.scheduler,
            self.config.snapping_time_ms,
            move || finish_close(&weak),
        ));
        debug!("sheet closing");
        true
    }

    fn detach_listeners(&self) {
        for listener in WindowListener::ALL {
            self.env.listeners.detach(listener);
        }
    }

    fn release_resources(&mut self) {
        self.detach_listeners();
        self.open_task = None;
        self.settle_task = None;
        self.close_task = None;
        self.gesture.release();
        self.lock.disengage();
    }
}

impl Drop for SheetInner {
    fn drop(&mut self) {
        self.release_resources();
    }
}

fn finish_close(weak: &WeakInner) {
    let Some(inner) = weak.upgrade() else {
        return;
    };
    let on_close = {
        let mut inner = inner.borrow_mut();
        inner.close_task = None;
        if inner.phase != SheetPhase::Closing {
            return;
        }
        inner.phase = SheetPhase::Closed;
        inner.detach_listeners();
        inner.env.surface.set_transition(None);
        inner.config.close_callback()
    };
    debug!("sheet closed");
    on_close();
}

/// A bottom sheet bound to its host environment.
///
/// This is the owning side: dropping the last `BottomSheet` for an instance
/// detaches its listeners, cancels pending animations and releases the scroll
/// lock. Hand out [`SheetHandle`]s for imperative access from elsewhere.
pub struct BottomSheet {
    inner: SharedInner,
}

impl BottomSheet {
    /// Creates a closed sheet. Call [`BottomSheet::open`] to show it.
    pub fn new(config: SheetConfig, env: SheetEnvironment) -> Self {
        Self {
            inner: Rc::new(RefCell::new(SheetInner::new(config, env))),
        }
    }

    /// Creates a sheet and runs the open sequence.
    pub fn mount(config: SheetConfig, env: SheetEnvironment) -> Self {
        let sheet = Self::new(config, env);
        sheet.open();
        sheet
    }

    pub fn handle(&self) -> SheetHandle {
        SheetHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Runs the open sequence. Ignored unless the sheet is closed.
    pub fn open(&self) {
        let weak = Rc::downgrade(&self.inner);
        let mut inner = self.inner.borrow_mut();
        if inner.phase != SheetPhase::Closed {
            return;
        }
        inner.open(weak);
    }

    /// Routes a pointer sample to the matching drag operation.
    pub fn pointer(&self, input: &PointerInput) {
        match input.kind {
            PointerEventKind::Down => self.drag_start(input),
            PointerEventKind::Move => self.drag_move(input),
            PointerEventKind::Up | PointerEventKind::Cancel => self.drag_end(),
        }
    }

    pub fn drag_start(&self, input: &PointerInput) {
        self.inner.borrow_mut().start_drag(input.position_y());
    }

    /// Follows the pointer while a drag is active. Safe to call for every
    /// pointer move on the page.
    pub fn drag_move(&self, input: &PointerInput) {
        self.inner.borrow_mut().track(input.position_y());
    }

    /// Releases the drag and settles on the nearest snap.
    ///
    /// `on_snap` sees the sheet still open. A release at zero with
    /// `close_on_snap_to_zero` set closes it once the callback returns.
    pub fn drag_end(&self) {
        let weak = Rc::downgrade(&self.inner);
        let settled = self
            .inner
            .borrow_mut()
            .settle(weak, None, SettleOrigin::Gesture);
        self.notify_snap(settled);
        if settled.is_some_and(|settled| settled.auto_close) {
            self.close();
        }
    }

    /// Animates to the snap nearest `value`. Never closes the sheet, even when
    /// it resolves to zero.
    pub fn snap_to(&self, value: f64) {
        let weak = Rc::downgrade(&self.inner);
        let settled = self
            .inner
            .borrow_mut()
            .settle(weak, Some(value), SettleOrigin::Programmatic);
        self.notify_snap(settled);
    }

    fn notify_snap(&self, settled: Option<Settled>) {
        let Some(Settled { resolved, .. }) = settled else {
            return;
        };
        let on_snap = self.inner.borrow().config.snap_callback();
        if let Some(on_snap) = on_snap {
            on_snap(resolved);
        }
    }

    /// Starts the close sequence. Repeated calls while closing are ignored, so
    /// `on_close` fires once per open.
    pub fn close(&self) {
        let weak = Rc::downgrade(&self.inner);
        self.inner.borrow_mut().begin_close(weak);
    }

    pub fn overlay_clicked(&self) {
        self.close();
    }

    pub fn key_up(&self, event: &KeyEvent) {
        if event.is_dismissal() {
            self.close();
        }
    }

    /// A fragment change while open means the user navigated back.
    pub fn hash_changed(&self) {
        self.close();
    }

    /// Detaches listeners, cancels pending animation tasks and releases the
    /// scroll lock, whatever the current phase.
    pub fn teardown(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.release_resources();
        inner.phase = SheetPhase::Closed;
        trace!("sheet torn down");
    }

    pub fn phase(&self) -> SheetPhase {
        self.inner.borrow().phase
    }

    /// Live height in percent of the viewport.
    pub fn height(&self) -> f64 {
        self.inner.borrow().gesture.height()
    }

    pub fn is_shown(&self) -> bool {
        is_shown(self.height())
    }

    pub fn is_dragging(&self) -> bool {
        self.inner.borrow().gesture.is_dragging()
    }

    /// Whether this sheet currently holds the document scroll lock.
    pub fn holds_scroll_lock(&self) -> bool {
        self.inner.borrow().lock.is_held()
    }
}

impl fmt::Debug for BottomSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_borrow() {
            Ok(inner) => f
                .debug_struct("BottomSheet")
                .field("phase", &inner.phase)
                .field("height", &inner.gesture.height())
                .field("dragging", &inner.gesture.is_dragging())
                .finish(),
            Err(_) => f.write_str("BottomSheet { <borrowed> }"),
        }
    }
}

/// Weak reference to a sheet for imperative control from outside its owner.
///
/// Every method is a no-op once the sheet is gone.
#[derive(Clone)]
pub struct SheetHandle {
    inner: WeakInner,
}

impl SheetHandle {
    fn with_sheet<R>(&self, f: impl FnOnce(&BottomSheet) -> R) -> Option<R> {
        let inner = self.inner.upgrade()?;
        Some(f(&BottomSheet { inner }))
    }

    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    pub fn close(&self) {
        self.with_sheet(BottomSheet::close);
    }

    pub fn snap_to(&self, value: f64) {
        self.with_sheet(|sheet| sheet.snap_to(value));
    }

    pub fn pointer(&self, input: &PointerInput) {
        self.with_sheet(|sheet| sheet.pointer(input));
    }

    pub fn drag_move(&self, input: &PointerInput) {
        self.with_sheet(|sheet| sheet.drag_move(input));
    }

    pub fn drag_end(&self) {
        self.with_sheet(BottomSheet::drag_end);
    }

    pub fn key_up(&self, event: &KeyEvent) {
        self.with_sheet(|sheet| sheet.key_up(event));
    }

    pub fn hash_changed(&self) {
        self.with_sheet(BottomSheet::hash_changed);
    }

    pub fn overlay_clicked(&self) {
        self.with_sheet(BottomSheet::overlay_clicked);
    }

    pub fn phase(&self) -> SheetPhase {
        self.with_sheet(BottomSheet::phase)
            .unwrap_or(SheetPhase::Closed)
    }

    pub fn height(&self) -> Option<f64> {
        self.with_sheet(BottomSheet::height)
    }
}

impl fmt::Debug for SheetHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SheetHandle")
            .field("alive", &self.is_alive())
            .finish()
    }
}
