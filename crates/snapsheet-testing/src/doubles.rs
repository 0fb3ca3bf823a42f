//! Recording implementations of the host collaborator traits.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use snapsheet_core::{
    KeyEvent, ListenerRegistry, Navigator, PointerInput, ScrollHost, SheetHandle, SheetSurface,
    WindowListener,
};

#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceCall {
    OverlayVisible(bool),
    Height(f64),
    Transition(Option<String>),
    Fullscreen(bool),
    Grabbing(bool),
}

/// Surface that keeps the latest visual state plus a log of every call.
#[derive(Default)]
pub struct RecordingSurface {
    overlay_visible: Cell<bool>,
    height: Cell<f64>,
    transition: RefCell<Option<String>>,
    fullscreen: Cell<bool>,
    grabbing: Cell<bool>,
    calls: RefCell<Vec<SurfaceCall>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn overlay_visible(&self) -> bool {
        self.overlay_visible.get()
    }

    pub fn height(&self) -> f64 {
        self.height.get()
    }

    pub fn transition(&self) -> Option<String> {
        self.transition.borrow().clone()
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen.get()
    }

    pub fn is_grabbing(&self) -> bool {
        self.grabbing.get()
    }

    pub fn calls(&self) -> Vec<SurfaceCall> {
        self.calls.borrow().clone()
    }

    /// Every height pushed to the surface, in order.
    pub fn heights(&self) -> Vec<f64> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                SurfaceCall::Height(height) => Some(*height),
                _ => None,
            })
            .collect()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    fn record(&self, call: SurfaceCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl SheetSurface for RecordingSurface {
    fn set_overlay_visible(&self, visible: bool) {
        self.overlay_visible.set(visible);
        self.record(SurfaceCall::OverlayVisible(visible));
    }

    fn set_height(&self, percent: f64) {
        self.height.set(percent);
        self.record(SurfaceCall::Height(percent));
    }

    fn set_transition(&self, transition: Option<&str>) {
        let transition = transition.map(str::to_owned);
        *self.transition.borrow_mut() = transition.clone();
        self.record(SurfaceCall::Transition(transition));
    }

    fn set_fullscreen(&self, fullscreen: bool) {
        self.fullscreen.set(fullscreen);
        self.record(SurfaceCall::Fullscreen(fullscreen));
    }

    fn set_grabbing(&self, grabbing: bool) {
        self.grabbing.set(grabbing);
        self.record(SurfaceCall::Grabbing(grabbing));
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavigationCall {
    Push(String),
    Replace(String),
}

/// In-memory browser history.
pub struct RecordingNavigator {
    entries: RefCell<Vec<String>>,
    calls: RefCell<Vec<NavigationCall>>,
}

impl RecordingNavigator {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            entries: RefCell::new(vec![url.into()]),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// History entries, oldest first. The last one is the current URL.
    pub fn entries(&self) -> Vec<String> {
        self.entries.borrow().clone()
    }

    pub fn calls(&self) -> Vec<NavigationCall> {
        self.calls.borrow().clone()
    }

    /// Simulates the browser back button, returning the URL navigated to.
    /// The sheet is not notified; dispatch the hash change separately.
    pub fn go_back(&self) -> Option<String> {
        let mut entries = self.entries.borrow_mut();
        if entries.len() < 2 {
            return None;
        }
        entries.pop();
        entries.last().cloned()
    }
}

impl Default for RecordingNavigator {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Navigator for RecordingNavigator {
    fn current_url(&self) -> String {
        self.entries.borrow().last().cloned().unwrap_or_default()
    }

    fn push_url(&self, url: &str) {
        self.entries.borrow_mut().push(url.to_owned());
        self.calls
            .borrow_mut()
            .push(NavigationCall::Push(url.to_owned()));
    }

    fn replace_url(&self, url: &str) {
        let mut entries = self.entries.borrow_mut();
        match entries.last_mut() {
            Some(current) => *current = url.to_owned(),
            None => entries.push(url.to_owned()),
        }
        self.calls
            .borrow_mut()
            .push(NavigationCall::Replace(url.to_owned()));
    }
}

/// Document whose scroll position freezes at zero while visually offset, the
/// way a fixed-position body behaves in a browser.
pub struct FakeDocument {
    content_height: Cell<f64>,
    viewport_height: Cell<f64>,
    scroll_offset: Cell<f64>,
    visual_offset: Cell<Option<f64>>,
    lock_marked: Cell<bool>,
}

impl FakeDocument {
    pub fn new(content_height: f64, viewport_height: f64) -> Self {
        Self {
            content_height: Cell::new(content_height),
            viewport_height: Cell::new(viewport_height),
            scroll_offset: Cell::new(0.0),
            visual_offset: Cell::new(None),
            lock_marked: Cell::new(false),
        }
    }

    pub fn with_scroll_offset(self, offset: f64) -> Self {
        self.scroll_offset.set(offset);
        self
    }

    pub fn set_viewport_height(&self, height: f64) {
        self.viewport_height.set(height);
    }

    pub fn set_content_height(&self, height: f64) {
        self.content_height.set(height);
    }

    pub fn visual_offset(&self) -> Option<f64> {
        self.visual_offset.get()
    }
}

impl Default for FakeDocument {
    fn default() -> Self {
        Self::new(2400.0, 800.0)
    }
}

impl ScrollHost for FakeDocument {
    fn content_height(&self) -> f64 {
        self.content_height.get()
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height.get()
    }

    fn scroll_offset(&self) -> f64 {
        self.scroll_offset.get()
    }

    fn scroll_to(&self, offset: f64) {
        self.scroll_offset.set(offset);
    }

    fn set_visual_offset(&self, offset: Option<f64>) {
        if offset.is_some() {
            self.scroll_offset.set(0.0);
        }
        self.visual_offset.set(offset);
    }

    fn is_lock_marked(&self) -> bool {
        self.lock_marked.get()
    }

    fn set_lock_marked(&self, marked: bool) {
        self.lock_marked.set(marked);
    }
}

/// Listener registry that keeps the attached handles so tests can dispatch
/// window events to them.
#[derive(Default)]
pub struct RecordingListeners {
    attached: RefCell<BTreeMap<WindowListener, SheetHandle>>,
    attach_count: Cell<usize>,
    detach_count: Cell<usize>,
}

impl RecordingListeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_attached(&self, listener: WindowListener) -> bool {
        self.attached.borrow().contains_key(&listener)
    }

    pub fn attached(&self) -> Vec<WindowListener> {
        self.attached.borrow().keys().copied().collect()
    }

    pub fn attach_count(&self) -> usize {
        self.attach_count.get()
    }

    /// Detach calls that actually removed a listener.
    pub fn detach_count(&self) -> usize {
        self.detach_count.get()
    }

    fn handle(&self, listener: WindowListener) -> Option<SheetHandle> {
        self.attached.borrow().get(&listener).cloned()
    }

    /// Delivers a window pointer move. Returns whether a listener received it.
    pub fn dispatch_pointer_move(&self, input: &PointerInput) -> bool {
        let Some(handle) = self.handle(WindowListener::PointerMove) else {
            return false;
        };
        handle.drag_move(input);
        true
    }

    /// Delivers a pointer release anywhere on the page.
    pub fn dispatch_pointer_up(&self) -> bool {
        let Some(handle) = self.handle(WindowListener::PointerUp) else {
            return false;
        };
        handle.drag_end();
        true
    }

    pub fn dispatch_hash_change(&self) -> bool {
        let Some(handle) = self.handle(WindowListener::HashChange) else {
            return false;
        };
        handle.hash_changed();
        true
    }

    pub fn dispatch_key_up(&self, key: &str) -> bool {
        let Some(handle) = self.handle(WindowListener::KeyUp) else {
            return false;
        };
        handle.key_up(&KeyEvent::key_up(key));
        true
    }
}

impl ListenerRegistry for RecordingListeners {
    fn attach(&self, listener: WindowListener, sheet: SheetHandle) {
        self.attached.borrow_mut().insert(listener, sheet);
        self.attach_count.set(self.attach_count.get() + 1);
    }

    fn detach(&self, listener: WindowListener) {
        if self.attached.borrow_mut().remove(&listener).is_some() {
            self.detach_count.set(self.detach_count.get() + 1);
        }
    }
}
