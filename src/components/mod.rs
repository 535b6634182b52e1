//! UI components built with Leptos.
//!
//! - [`terminal`] - Terminal emulator interface driving the shell engine

pub mod terminal;

pub use terminal::Terminal;
