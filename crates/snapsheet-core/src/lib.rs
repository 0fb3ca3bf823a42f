//! Headless bottom sheet controller.
//!
//! A bottom sheet is a panel that slides up from the bottom of the viewport,
//! follows the pointer while its handle is dragged, and settles on the nearest
//! configured snap height when released. This crate owns the gesture math, snap
//! resolution and the open/close choreography; rendering, history and timers
//! are delegated to the host through the traits in [`platform`].

mod animation;
mod config;
mod event;
mod gesture;
pub mod platform;
mod scroll_lock;
mod sheet;
mod snap;
mod task;
mod url;

pub use animation::{Easing, TransitionSpec};
pub use config::{SheetConfig, DEFAULT_SNAPPING_TIME_MS};
pub use event::{KeyEvent, KeyEventType, PointerEventKind, PointerInput};
pub use gesture::GestureTracker;
pub use platform::{
    ListenerRegistry, Navigator, Scheduler, ScrollHost, SheetEnvironment, SheetSurface, TaskId,
    WindowListener,
};
pub use scroll_lock::ViewportLock;
pub use sheet::{BottomSheet, SheetHandle, SheetPhase};
pub use snap::{is_shown, nearest_snap, CLOSED_HEIGHT, FULL_HEIGHT};
pub use task::DelayedTask;
pub use url::{canonical_url, sheet_url, SHEET_FRAGMENT_PREFIX};
