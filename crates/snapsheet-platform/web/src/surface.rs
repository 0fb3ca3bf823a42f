use snapsheet_core::SheetSurface;
use web_sys::HtmlElement;

use crate::error::warn_on_err;

/// Class toggled on the overlay while the sheet is open.
pub const SHOWING_CLASS: &str = "showing";
/// Class toggled on the content while it covers the whole viewport.
pub const FULLSCREEN_CLASS: &str = "fullscreen";

/// CSS `max-height` for a height in percent of the dynamic viewport.
pub fn height_css(percent: f64) -> String {
    format!("{}dvh", percent)
}

/// Sheet visuals backed by the overlay, content and drag handle elements.
pub struct DomSurface {
    overlay: HtmlElement,
    content: HtmlElement,
    handle: HtmlElement,
    body: HtmlElement,
}

impl DomSurface {
    pub fn new(
        overlay: HtmlElement,
        content: HtmlElement,
        handle: HtmlElement,
        body: HtmlElement,
    ) -> Self {
        Self {
            overlay,
            content,
            handle,
            body,
        }
    }
}

impl SheetSurface for DomSurface {
    fn set_overlay_visible(&self, visible: bool) {
        let result = self
            .overlay
            .class_list()
            .toggle_with_force(SHOWING_CLASS, visible);
        warn_on_err("overlay class toggle", result);
    }

    fn set_height(&self, percent: f64) {
        let result = self
            .content
            .style()
            .set_property("max-height", &height_css(percent));
        warn_on_err("sheet max-height update", result);
    }

    fn set_transition(&self, transition: Option<&str>) {
        let style = self.content.style();
        let result = match transition {
            Some(css) => style.set_property("transition", css),
            None => style.remove_property("transition").map(drop),
        };
        warn_on_err("sheet transition update", result);
    }

    fn set_fullscreen(&self, fullscreen: bool) {
        let result = self
            .content
            .class_list()
            .toggle_with_force(FULLSCREEN_CLASS, fullscreen);
        warn_on_err("fullscreen class toggle", result);
    }

    fn set_grabbing(&self, grabbing: bool) {
        let cursor = if grabbing { "grabbing" } else { "" };
        for element in [&self.handle, &self.body] {
            warn_on_err("cursor update", element.style().set_property("cursor", cursor));
        }
    }
}
