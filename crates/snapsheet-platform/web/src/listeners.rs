use std::cell::RefCell;
use std::collections::HashMap;

use gloo::events::EventListener;
use log::trace;
use smallvec::SmallVec;
use snapsheet_core::{KeyEventType, ListenerRegistry, PointerEventKind, SheetHandle, WindowListener};
use web_sys::{Event, Window};

use crate::input::{key_input, pointer_input};

/// DOM event names backing each window listener.
pub fn event_names(listener: WindowListener) -> &'static [&'static str] {
    match listener {
        WindowListener::PointerMove => &["pointermove", "touchmove"],
        WindowListener::PointerUp => &["pointerup", "pointercancel"],
        WindowListener::HashChange => &["hashchange"],
        WindowListener::KeyUp => &["keyup"],
    }
}

fn forward(listener: WindowListener, sheet: &SheetHandle, event: &Event) {
    match listener {
        WindowListener::PointerMove => {
            if let Some(input) = pointer_input(PointerEventKind::Move, event) {
                sheet.drag_move(&input);
            }
        }
        WindowListener::PointerUp => sheet.drag_end(),
        WindowListener::HashChange => sheet.hash_changed(),
        WindowListener::KeyUp => {
            if let Some(key) = key_input(event, KeyEventType::KeyUp) {
                sheet.key_up(&key);
            }
        }
    }
}

/// Window listeners registered with `addEventListener`.
///
/// Each attached listener keeps its `EventListener` guards, and dropping a
/// guard removes exactly the callback it registered.
pub struct WindowListeners {
    window: Window,
    attached: RefCell<HashMap<WindowListener, SmallVec<[EventListener; 2]>>>,
}

impl WindowListeners {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            attached: RefCell::new(HashMap::new()),
        }
    }

    pub fn is_attached(&self, listener: WindowListener) -> bool {
        self.attached.borrow().contains_key(&listener)
    }
}

impl ListenerRegistry for WindowListeners {
    fn attach(&self, listener: WindowListener, sheet: SheetHandle) {
        let guards = event_names(listener)
            .iter()
            .map(|&name| {
                let sheet = sheet.clone();
                EventListener::new(&self.window, name, move |event| {
                    forward(listener, &sheet, event)
                })
            })
            .collect();
        let replaced = self.attached.borrow_mut().insert(listener, guards);
        drop(replaced);
        trace!("attached {:?} window listener", listener);
    }

    fn detach(&self, listener: WindowListener) {
        let removed = self.attached.borrow_mut().remove(&listener);
        if removed.is_some() {
            trace!("detached {:?} window listener", listener);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::HANDLE_EVENTS;

    #[test]
    fn releases_are_heard_page_wide() {
        assert_eq!(
            event_names(WindowListener::PointerUp),
            &["pointerup", "pointercancel"]
        );
        let handle_names: Vec<&str> = HANDLE_EVENTS.iter().map(|(name, _)| *name).collect();
        for name in event_names(WindowListener::PointerUp) {
            assert!(!handle_names.contains(name), "{name} would settle twice");
        }
    }

    #[test]
    fn pointer_moves_cover_touch_devices() {
        assert_eq!(
            event_names(WindowListener::PointerMove),
            &["pointermove", "touchmove"]
        );
        for listener in WindowListener::ALL {
            assert!(!event_names(listener).is_empty());
        }
    }
}
