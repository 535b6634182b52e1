//! Runs engine effects on the browser event loop.
//!
//! The engine never waits. Reveals are paced here with timers, and contact
//! submissions are sent here; each result is fed back into the engine.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use super::ScreenSurface;
use crate::config::CONTACT_ENDPOINT;
use crate::core::{Effect, ShellEngine, Submission};
use crate::utils::{BrowserNavigator, post_json};

pub type BrowserEngine = ShellEngine<ScreenSurface, BrowserNavigator>;

/// Engine shared between event handlers and the async tasks below.
///
/// Disposed together with the terminal view; tasks stop as soon as
/// `try_update_value` returns `None`.
pub type EngineHandle = StoredValue<BrowserEngine, LocalStorage>;

/// Carry out `effect` for `engine`.
pub fn drive(engine: EngineHandle, effect: Effect) {
    match effect {
        Effect::None => {}
        Effect::Reveal => spawn_local(reveal(engine)),
        Effect::Submit(submission) => spawn_local(submit(engine, submission)),
    }
}

async fn reveal(engine: EngineHandle) {
    while let Some(Some(delay_ms)) = engine.try_update_value(|e| e.tick()) {
        if delay_ms > 0 {
            TimeoutFuture::new(delay_ms).await;
        }
    }
}

async fn submit(engine: EngineHandle, submission: Submission) {
    let outcome = post_json(CONTACT_ENDPOINT, &submission.form).await;
    if let Some(effect) = engine.try_update_value(|e| e.finish_submission(submission.ticket, outcome)) {
        drive(engine, effect);
    }
}
