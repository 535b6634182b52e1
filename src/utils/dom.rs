//! DOM and Web API utility functions.
//!
//! Provides safe, consistent access to browser APIs with proper error handling.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlAnchorElement, Window};

use crate::core::Navigator;
use crate::core::error::NavigationError;

/// Get the browser window object.
#[inline]
pub fn window() -> Option<Window> {
    web_sys::window()
}

fn js_error(value: JsValue) -> NavigationError {
    NavigationError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}

// =============================================================================
// Browser Navigation
// =============================================================================

/// Opens external references in a new browser tab.
///
/// Tries a blank popup first and points it at the url with its opener
/// detached. When popups are blocked, a temporary `noopener` anchor is
/// clicked instead.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn open(&self, url: &str) -> Result<(), NavigationError> {
        let window = window().ok_or(NavigationError::NoWindow)?;

        match window.open_with_url_and_target("", "_blank") {
            Ok(Some(popup)) => {
                let _ = popup.set_opener(&JsValue::NULL);
                popup.location().set_href(url).map_err(js_error)
            }
            _ => open_with_anchor(&window, url),
        }
    }
}

fn open_with_anchor(window: &Window, url: &str) -> Result<(), NavigationError> {
    let document = window.document().ok_or(NavigationError::Blocked)?;
    let body = document.body().ok_or(NavigationError::Blocked)?;

    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(js_error)?
        .dyn_into()
        .map_err(|_| NavigationError::Blocked)?;
    anchor.set_href(url);
    anchor.set_target("_blank");
    anchor.set_rel("noopener noreferrer");

    body.append_child(&anchor).map_err(js_error)?;
    anchor.click();
    anchor.remove();
    Ok(())
}
