//! A portfolio presented as an interactive shell in the browser.
//!
//! - [`core`] - Shell engine, commands, paths, and the virtual filesystem
//! - [`models`] - Plain data types shared across layers
//! - [`components`] - Leptos view hosting the engine
//! - [`utils`] - Browser helpers

pub mod app;
pub mod components;
pub mod config;
pub mod core;
pub mod models;
pub mod utils;
