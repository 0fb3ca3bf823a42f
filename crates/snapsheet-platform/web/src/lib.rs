//! Browser bindings for snapsheet.
//!
//! Implements the collaborator traits of `snapsheet-core` on top of the DOM
//! and exposes [`WebBottomSheet`] to bind a sheet to existing markup:
//!
//! ```html
//! <div class="bottom-sheet" id="filters">
//!   <div class="overlay"></div>
//!   <div class="bottom-sheet-content">
//!     <header><div class="handler"></div></header>
//!     ...
//!   </div>
//! </div>
//! ```

mod error;
mod input;
mod listeners;
mod navigator;
mod scheduler;
mod scroll;
mod sheet;
mod surface;

pub use error::SheetError;
pub use input::{key_input, pointer_input};
pub use listeners::{event_names, WindowListeners};
pub use navigator::BrowserNavigator;
pub use scheduler::TimeoutScheduler;
pub use scroll::{DocumentScrollHost, LOCK_ATTRIBUTE};
pub use sheet::{WebBottomSheet, CONTENT_SELECTOR, HANDLE_SELECTOR, OVERLAY_SELECTOR};
pub use surface::{height_css, DomSurface, FULLSCREEN_CLASS, SHOWING_CLASS};
