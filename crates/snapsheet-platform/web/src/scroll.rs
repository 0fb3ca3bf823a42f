use snapsheet_core::ScrollHost;
use web_sys::{Document, HtmlElement, Window};

use crate::error::warn_on_err;

/// Attribute set on `<body>` while a sheet holds the scroll lock.
pub const LOCK_ATTRIBUTE: &str = "data-bottom-sheet-lock";

/// Page scrolling, frozen by pinning `<body>` with `position: fixed`.
pub struct DocumentScrollHost {
    window: Window,
    document: Document,
    body: HtmlElement,
}

impl DocumentScrollHost {
    pub fn new(window: Window, document: Document, body: HtmlElement) -> Self {
        Self {
            window,
            document,
            body,
        }
    }
}

impl ScrollHost for DocumentScrollHost {
    fn content_height(&self) -> f64 {
        self.document
            .document_element()
            .map(|root| root.scroll_height() as f64)
            .unwrap_or_default()
    }

    fn viewport_height(&self) -> f64 {
        self.window
            .inner_height()
            .ok()
            .and_then(|height| height.as_f64())
            .unwrap_or_default()
    }

    fn scroll_offset(&self) -> f64 {
        self.window.scroll_y().unwrap_or_default()
    }

    fn scroll_to(&self, offset: f64) {
        self.window.scroll_to_with_x_and_y(0.0, offset);
    }

    fn set_visual_offset(&self, offset: Option<f64>) {
        let style = self.body.style();
        match offset {
            Some(top) => {
                let top = format!("{}px", top);
                let pinned = [("position", "fixed"), ("top", top.as_str()), ("width", "100%")];
                for (property, value) in pinned {
                    warn_on_err("body pinning", style.set_property(property, value));
                }
            }
            None => {
                for property in ["position", "top", "width"] {
                    warn_on_err("body unpinning", style.remove_property(property));
                }
            }
        }
    }

    fn is_lock_marked(&self) -> bool {
        self.body.has_attribute(LOCK_ATTRIBUTE)
    }

    fn set_lock_marked(&self, marked: bool) {
        let result = if marked {
            self.body.set_attribute(LOCK_ATTRIBUTE, "")
        } else {
            self.body.remove_attribute(LOCK_ATTRIBUTE)
        };
        warn_on_err("scroll lock marker update", result);
    }
}
