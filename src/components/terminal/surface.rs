//! Reactive surface backed by a [`Screen`] signal.

use leptos::prelude::*;

use crate::core::Surface;
use crate::models::Screen;

/// Writes into a [`Screen`] signal and keeps the view scrolled to the end.
#[derive(Clone, Copy)]
pub struct ScreenSurface {
    screen: RwSignal<Screen>,
    viewport: NodeRef<leptos::html::Div>,
}

impl ScreenSurface {
    pub fn new(screen: RwSignal<Screen>, viewport: NodeRef<leptos::html::Div>) -> Self {
        Self { screen, viewport }
    }

    fn scroll_to_end(&self) {
        if let Some(el) = self.viewport.get_untracked() {
            el.set_scroll_top(el.scroll_height());
        }
    }
}

impl Surface for ScreenSurface {
    fn write(&mut self, text: &str) {
        self.screen.update(|s| s.write(text));
    }

    fn clear(&mut self) {
        self.screen.update(Screen::clear);
    }

    fn fit(&mut self) {
        self.scroll_to_end();
    }
}
