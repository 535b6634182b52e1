//! Terminal view component.
//!
//! Owns the screen signal and the engine, forwards keystrokes and resize
//! events, and renders the screen as preformatted text.

use leptos::{ev, prelude::*};

use super::{EngineHandle, ScreenSurface, drive};
use crate::core::{ShellEngine, VirtualFs};
use crate::models::{KeyAction, KeyEvent, Screen};
use crate::utils::BrowserNavigator;

stylance::import_crate_style!(css, "src/components/terminal/terminal.module.css");

/// Keep the newest output visible whenever the screen changes.
fn setup_autoscroll_effect(screen: RwSignal<Screen>, viewport: NodeRef<leptos::html::Div>) {
    Effect::new(move || {
        screen.track();
        if let Some(el) = viewport.get() {
            el.set_scroll_top(el.scroll_height());
        }
    });
}

#[component]
pub fn Terminal(fs: VirtualFs) -> impl IntoView {
    let screen = RwSignal::new(Screen::new());
    let viewport = NodeRef::<leptos::html::Div>::new();
    let engine: EngineHandle = StoredValue::new_local(ShellEngine::new(
        ScreenSurface::new(screen, viewport),
        BrowserNavigator,
        fs,
    ));

    // Welcome text runs once, after the view is attached
    let mounted = StoredValue::new(false);
    Effect::new(move || {
        if let Some(el) = viewport.get()
            && !mounted.get_value()
        {
            mounted.set_value(true);
            let _ = el.focus();
            if let Some(effect) = engine.try_update_value(|e| e.mount()) {
                drive(engine, effect);
            }
        }
    });

    setup_autoscroll_effect(screen, viewport);

    let resize = window_event_listener(ev::resize, move |_| {
        engine.try_update_value(|e| e.resize());
    });
    on_cleanup(move || {
        resize.remove();
        engine.try_update_value(|e| e.detach());
    });

    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        let key = KeyEvent::from(&ev);
        // Keep the browser from scrolling or navigating on keys the shell uses
        if key.action() != KeyAction::Ignored {
            ev.prevent_default();
        }
        if let Some(effect) = engine.try_update_value(|e| e.on_key(&key)) {
            drive(engine, effect);
        }
    };

    let focus = move |_| {
        if let Some(el) = viewport.get_untracked() {
            let _ = el.focus();
        }
    };

    view! {
        <div
            node_ref=viewport
            class=css::container
            tabindex="0"
            on:keydown=on_keydown
            on:click=focus
        >
            <pre class=css::output>
                {move || screen.with(|s| {
                    s.scrollback().fold(String::new(), |mut text, line| {
                        text.push_str(line);
                        text.push('\n');
                        text
                    })
                })}
                {move || {
                    let (before, under, after) = screen.with(Screen::cursor_split);
                    view! {
                        <span>{before}</span>
                        <span class=css::cursor>{under.to_string()}</span>
                        <span>{after}</span>
                    }
                }}
            </pre>
        </div>
    }
}
