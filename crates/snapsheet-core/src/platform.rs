//! Host collaborator traits.
//!
//! These traits let the sheet delegate rendering, navigation, document scroll
//! state, timers and global listeners to the host, so the state machine can run
//! against a browser or against the recording doubles in `snapsheet-testing`.
//! All methods take `&self`; implementations use interior mutability the way
//! single-threaded UI hosts do.

use std::rc::Rc;

use crate::sheet::SheetHandle;

/// Identifier of a task handed to a [`Scheduler`].
pub type TaskId = u64;

/// The rendered panel: overlay layer plus the content element.
pub trait SheetSurface {
    /// Shows or hides the dimming overlay behind the sheet.
    fn set_overlay_visible(&self, visible: bool);

    /// Sets the visual height of the content, in percent of the viewport.
    fn set_height(&self, percent: f64);

    /// Applies a CSS transition to the content, or removes it with `None`.
    fn set_transition(&self, transition: Option<&str>);

    /// Toggles the "fullscreen" visual flag.
    fn set_fullscreen(&self, fullscreen: bool);

    /// Toggles the "grabbing" interaction hint on the handle and document.
    fn set_grabbing(&self, grabbing: bool);
}

/// Router and history access.
pub trait Navigator {
    /// The router's canonical URL for the current page.
    fn current_url(&self) -> String;

    fn push_url(&self, url: &str);

    fn replace_url(&self, url: &str);
}

/// Document level scroll state shared by every sheet on the page.
pub trait ScrollHost {
    /// Total height of the document content.
    fn content_height(&self) -> f64;

    /// Height of the visible viewport.
    fn viewport_height(&self) -> f64;

    fn scroll_offset(&self) -> f64;

    fn scroll_to(&self, offset: f64);

    /// Shifts the document visually by `offset` pixels while its real scroll
    /// position is frozen, or removes the shift with `None`.
    fn set_visual_offset(&self, offset: Option<f64>);

    /// Shared marker telling whether a scroll lock is currently engaged.
    fn is_lock_marked(&self) -> bool;

    fn set_lock_marked(&self, marked: bool);
}

/// Runs work after a delay.
///
/// Implementations must never run a task synchronously from within
/// [`Scheduler::schedule`]. Cancelling an id that already ran, or was already
/// cancelled, is a no-op.
pub trait Scheduler {
    fn schedule(&self, delay_millis: u64, task: Box<dyn FnOnce()>) -> TaskId;

    fn cancel(&self, id: TaskId);
}

/// Window level listeners a sheet keeps while open.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WindowListener {
    /// Pointer and touch moves, feeding the drag.
    PointerMove,
    /// Pointer releases anywhere on the page, ending the drag.
    PointerUp,
    /// Fragment changes, treated as back navigation.
    HashChange,
    /// Key releases, watched for escape.
    KeyUp,
}

impl WindowListener {
    pub const ALL: [WindowListener; 4] = [
        WindowListener::PointerMove,
        WindowListener::PointerUp,
        WindowListener::HashChange,
        WindowListener::KeyUp,
    ];
}

/// Attaches and detaches window listeners that forward to a sheet.
///
/// The registry owns the concrete handler it creates on `attach` and must
/// remove that same handler on `detach`. Detaching a listener that is not
/// attached is a no-op.
pub trait ListenerRegistry {
    fn attach(&self, listener: WindowListener, sheet: SheetHandle);

    fn detach(&self, listener: WindowListener);
}

/// Everything a sheet needs from its host.
#[derive(Clone)]
pub struct SheetEnvironment {
    pub surface: Rc<dyn SheetSurface>,
    pub navigator: Rc<dyn Navigator>,
    pub scroll: Rc<dyn ScrollHost>,
    pub scheduler: Rc<dyn Scheduler>,
    pub listeners: Rc<dyn ListenerRegistry>,
}
