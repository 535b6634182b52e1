//! Browser-only checks for the reactive surface.

#![cfg(target_arch = "wasm32")]

use leptos::prelude::*;
use termfolio::components::terminal::ScreenSurface;
use termfolio::core::Surface;
use termfolio::models::Screen;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn screen_surface_writes_into_signal() {
    let owner = Owner::new();
    owner.with(|| {
        let screen = RwSignal::new(Screen::new());
        let mut surface = ScreenSurface::new(screen, NodeRef::new());

        surface.write("guest@portfolio:~$ lx\x08 \x08s");
        assert_eq!(screen.with_untracked(Screen::text), "guest@portfolio:~$ ls");

        surface.clear();
        assert_eq!(screen.with_untracked(Screen::text), "");

        // No element attached yet; fitting is a no-op
        surface.fit();
    });
}
