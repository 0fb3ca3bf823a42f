use std::rc::Rc;

use gloo::events::EventListener;
use log::debug;
use snapsheet_core::{BottomSheet, PointerEventKind, SheetConfig, SheetEnvironment, SheetHandle};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

use crate::error::{warn_on_err, SheetError};
use crate::input::pointer_input;
use crate::listeners::WindowListeners;
use crate::navigator::BrowserNavigator;
use crate::scheduler::TimeoutScheduler;
use crate::scroll::DocumentScrollHost;
use crate::surface::DomSurface;

/// Dimming layer behind the sheet; clicking it dismisses.
pub const OVERLAY_SELECTOR: &str = ".overlay";
/// The panel whose `max-height` is animated.
pub const CONTENT_SELECTOR: &str = ".bottom-sheet-content";
/// Drag handle inside the content.
pub const HANDLE_SELECTOR: &str = "header";

/// Events heard on the drag handle itself. Moves and releases are heard on
/// the window so a drag survives the pointer leaving the handle.
pub(crate) const HANDLE_EVENTS: [(&str, PointerEventKind); 1] =
    [("pointerdown", PointerEventKind::Down)];

fn find(parent: &Element, selector: &'static str) -> Result<HtmlElement, SheetError> {
    parent
        .query_selector(selector)?
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
        .ok_or(SheetError::MissingElement { selector })
}

/// Requested root classes the markup does not already carry, without
/// duplicates. Only these are removed again on unmount.
fn classes_to_add(requested: &[String], present: impl Fn(&str) -> bool) -> Vec<String> {
    let mut added: Vec<String> = Vec::new();
    for class_name in requested {
        if class_name.is_empty() || present(class_name) || added.contains(class_name) {
            continue;
        }
        added.push(class_name.clone());
    }
    added
}

/// A [`BottomSheet`] bound to existing page markup.
///
/// The root must contain an `.overlay` and a `.bottom-sheet-content` holding
/// a `header` drag handle. Dropping the value removes every listener, cancels
/// pending timers and releases the scroll lock. Do not drop it from inside its
/// own `on_snap` callback; close it instead.
pub struct WebBottomSheet {
    sheet: BottomSheet,
    root: HtmlElement,
    added_classes: Vec<String>,
    _element_listeners: Vec<EventListener>,
}

impl WebBottomSheet {
    /// Wires the sheet to `root` and runs the open sequence.
    pub fn mount(root: &HtmlElement, config: SheetConfig) -> Result<Self, SheetError> {
        #[cfg(target_arch = "wasm32")]
        console_error_panic_hook::set_once();

        let window = web_sys::window().ok_or(SheetError::NoWindow)?;
        let document = window.document().ok_or(SheetError::NoDocument)?;
        let body = document.body().ok_or(SheetError::NoBody)?;

        let overlay = find(root, OVERLAY_SELECTOR)?;
        let content = find(root, CONTENT_SELECTOR)?;
        let handle = find(&content, HANDLE_SELECTOR)?;

        let class_list = root.class_list();
        let added_classes = classes_to_add(&config.class_names, |name| class_list.contains(name));
        for class_name in &added_classes {
            class_list.add_1(class_name)?;
        }

        let env = SheetEnvironment {
            surface: Rc::new(DomSurface::new(
                overlay.clone(),
                content,
                handle.clone(),
                body.clone(),
            )),
            navigator: Rc::new(BrowserNavigator::new(window.clone())),
            scroll: Rc::new(DocumentScrollHost::new(window.clone(), document, body)),
            scheduler: Rc::new(TimeoutScheduler::new()),
            listeners: Rc::new(WindowListeners::new(window)),
        };
        let sheet = BottomSheet::new(config, env);

        let mut element_listeners = Vec::with_capacity(HANDLE_EVENTS.len() + 1);
        for (name, kind) in HANDLE_EVENTS {
            let target = sheet.handle();
            element_listeners.push(EventListener::new(&handle, name, move |event| {
                if let Some(input) = pointer_input(kind, event) {
                    target.pointer(&input);
                }
            }));
        }
        {
            let target = sheet.handle();
            element_listeners.push(EventListener::new(&overlay, "click", move |_| {
                target.overlay_clicked();
            }));
        }

        sheet.open();
        debug!("bottom sheet mounted");
        Ok(Self {
            sheet,
            root: root.clone(),
            added_classes,
            _element_listeners: element_listeners,
        })
    }

    pub fn sheet(&self) -> &BottomSheet {
        &self.sheet
    }

    pub fn handle(&self) -> SheetHandle {
        self.sheet.handle()
    }

    pub fn close(&self) {
        self.sheet.close();
    }

    pub fn snap_to(&self, value: f64) {
        self.sheet.snap_to(value);
    }
}

impl Drop for WebBottomSheet {
    fn drop(&mut self) {
        self.sheet.teardown();
        let class_list = self.root.class_list();
        for class_name in &self.added_classes {
            warn_on_err("root class removal", class_list.remove_1(class_name));
        }
        debug!("bottom sheet unmounted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn only_new_root_classes_are_recorded() {
        let requested = names(&["sheet", "compact", "", "sheet", "dark"]);
        let added = classes_to_add(&requested, |name| name == "dark");
        assert_eq!(added, names(&["sheet", "compact"]));
    }

    #[test]
    fn nothing_is_recorded_when_the_markup_has_every_class() {
        let requested = names(&["sheet"]);
        assert!(classes_to_add(&requested, |_| true).is_empty());
        assert!(classes_to_add(&[], |_| false).is_empty());
    }
}
