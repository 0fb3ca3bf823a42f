use log::warn;
use snapsheet_core::Navigator;
use wasm_bindgen::JsValue;
use web_sys::Window;

use crate::error::describe;

/// History access through `window.location` and `window.history`.
pub struct BrowserNavigator {
    window: Window,
}

impl BrowserNavigator {
    pub fn new(window: Window) -> Self {
        Self { window }
    }

    fn update(&self, url: &str, push: bool) {
        let history = match self.window.history() {
            Ok(history) => history,
            Err(err) => {
                warn!("history unavailable: {}", describe(&err));
                return;
            }
        };
        let result = if push {
            history.push_state_with_url(&JsValue::NULL, "", Some(url))
        } else {
            history.replace_state_with_url(&JsValue::NULL, "", Some(url))
        };
        if let Err(err) = result {
            warn!("history update to '{}' failed: {}", url, describe(&err));
        }
    }
}

impl Navigator for BrowserNavigator {
    fn current_url(&self) -> String {
        let location = self.window.location();
        let path = location.pathname().unwrap_or_default();
        let search = location.search().unwrap_or_default();
        let hash = location.hash().unwrap_or_default();
        format!("{path}{search}{hash}")
    }

    fn push_url(&self, url: &str) {
        self.update(url, true);
    }

    fn replace_url(&self, url: &str) {
        self.update(url, false);
    }
}
