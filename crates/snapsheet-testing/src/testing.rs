use std::cell::{Cell, RefCell};
use std::rc::Rc;

use snapsheet_core::{
    BottomSheet, PointerEventKind, PointerInput, ScrollHost, SheetConfig, SheetEnvironment,
    SheetHandle,
};

use crate::doubles::{FakeDocument, RecordingListeners, RecordingNavigator, RecordingSurface};
use crate::scheduler::ManualScheduler;

/// Counts `on_close` calls and records every `on_snap` value.
#[derive(Clone, Default)]
pub struct CallbackRecorder {
    closes: Rc<Cell<usize>>,
    snaps: Rc<RefCell<Vec<f64>>>,
}

impl CallbackRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A config whose callbacks report to this recorder.
    pub fn config(&self, snaps: impl IntoIterator<Item = f64>, default_snap: f64) -> SheetConfig {
        let closes = Rc::clone(&self.closes);
        let recorded = Rc::clone(&self.snaps);
        SheetConfig::new(snaps, default_snap, move || closes.set(closes.get() + 1))
            .on_snap(move |snap| recorded.borrow_mut().push(snap))
    }

    pub fn close_count(&self) -> usize {
        self.closes.get()
    }

    pub fn snaps(&self) -> Vec<f64> {
        self.snaps.borrow().clone()
    }

    pub fn last_snap(&self) -> Option<f64> {
        self.snaps.borrow().last().copied()
    }
}

/// Headless harness for driving a sheet in tests.
///
/// `SheetTestRule` owns recording doubles for every host collaborator and a
/// virtual clock, and exposes helpers to press, move and release the pointer
/// the way a browser would deliver those events: presses and releases on the
/// drag handle, moves through the window listener.
pub struct SheetTestRule {
    surface: Rc<RecordingSurface>,
    navigator: Rc<RecordingNavigator>,
    document: Rc<FakeDocument>,
    listeners: Rc<RecordingListeners>,
    scheduler: ManualScheduler,
    callbacks: CallbackRecorder,
    sheet: Option<BottomSheet>,
}

impl SheetTestRule {
    pub fn new() -> Self {
        Self::with_url("/")
    }

    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            surface: Rc::new(RecordingSurface::new()),
            navigator: Rc::new(RecordingNavigator::new(url)),
            document: Rc::new(FakeDocument::default()),
            listeners: Rc::new(RecordingListeners::new()),
            scheduler: ManualScheduler::new(),
            callbacks: CallbackRecorder::new(),
            sheet: None,
        }
    }

    /// Replaces the document. Must be called before mounting.
    pub fn with_document(mut self, document: FakeDocument) -> Self {
        self.document = Rc::new(document);
        self
    }

    pub fn environment(&self) -> SheetEnvironment {
        SheetEnvironment {
            surface: self.surface.clone(),
            navigator: self.navigator.clone(),
            scroll: self.document.clone(),
            scheduler: Rc::new(self.scheduler.clone()),
            listeners: self.listeners.clone(),
        }
    }

    /// A config wired to this rule's [`CallbackRecorder`].
    pub fn config(&self, snaps: impl IntoIterator<Item = f64>, default_snap: f64) -> SheetConfig {
        self.callbacks.config(snaps, default_snap)
    }

    /// Mounts a sheet, running its open sequence.
    pub fn mount(&mut self, config: SheetConfig) -> &BottomSheet {
        let sheet = BottomSheet::mount(config, self.environment());
        self.sheet.insert(sheet)
    }

    /// Tears the mounted sheet down and drops it.
    pub fn unmount(&mut self) {
        if let Some(sheet) = self.sheet.take() {
            sheet.teardown();
        }
    }

    pub fn sheet(&self) -> &BottomSheet {
        self.sheet.as_ref().expect("no sheet mounted")
    }

    pub fn handle(&self) -> SheetHandle {
        self.sheet().handle()
    }

    /// Pointer down on the drag handle at page coordinate `y`.
    pub fn press(&self, y: f64) {
        self.sheet()
            .pointer(&PointerInput::pointer(PointerEventKind::Down, y));
    }

    /// Pointer move delivered through the window listener. Returns whether a
    /// listener was attached to receive it.
    pub fn move_to(&self, y: f64) -> bool {
        self.listeners
            .dispatch_pointer_move(&PointerInput::pointer(PointerEventKind::Move, y))
    }

    /// Pointer up delivered through the window listener, so it lands
    /// wherever the pointer ended up. Returns whether a listener received it.
    pub fn release(&self) -> bool {
        self.listeners.dispatch_pointer_up()
    }

    /// Full drag gesture from `from` to `to`, moving in `steps` increments.
    pub fn drag(&self, from: f64, to: f64, steps: usize) {
        self.press(from);
        let steps = steps.max(1);
        for step in 1..=steps {
            let y = from + (to - from) * step as f64 / steps as f64;
            self.move_to(y);
        }
        self.release();
    }

    /// Pixel travel that changes the sheet height by `percent` of the viewport.
    pub fn pixels_for(&self, percent: f64) -> f64 {
        self.document.viewport_height() * percent / 100.0
    }

    pub fn advance_by(&self, millis: u64) -> usize {
        self.scheduler.advance_by(millis)
    }

    pub fn run_until_idle(&self) -> usize {
        self.scheduler.run_until_idle()
    }

    pub fn surface(&self) -> &RecordingSurface {
        &self.surface
    }

    pub fn navigator(&self) -> &RecordingNavigator {
        &self.navigator
    }

    pub fn document(&self) -> &FakeDocument {
        &self.document
    }

    pub fn listeners(&self) -> &RecordingListeners {
        &self.listeners
    }

    pub fn scheduler(&self) -> &ManualScheduler {
        &self.scheduler
    }

    pub fn callbacks(&self) -> &CallbackRecorder {
        &self.callbacks
    }
}

impl Default for SheetTestRule {
    fn default() -> Self {
        Self::new()
    }
}
