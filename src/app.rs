//! Root application module.
//!
//! Builds the virtual filesystem and renders the terminal.

use leptos::prelude::*;

use crate::components::Terminal;
use crate::core::VirtualFs;

/// Load the built-in filesystem, falling back to an empty one.
///
/// A broken definition still leaves a working shell; every lookup then
/// reports a missing file.
fn load_filesystem() -> VirtualFs {
    VirtualFs::builtin().unwrap_or_else(|_e| {
        #[cfg(target_arch = "wasm32")]
        web_sys::console::warn_1(&format!("filesystem definition rejected: {}", _e).into());
        VirtualFs::empty()
    })
}

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    view! { <Terminal fs=load_filesystem() /> }
}
