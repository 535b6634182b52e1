//! Data models and types for the application.
//!
//! Contains domain types for:
//! - [`FsNode`], [`FsDefinition`] - Virtual filesystem representation
//! - [`ContactForm`] - Payload of the contact dialog
//! - [`KeyEvent`], [`KeyAction`] - Keystrokes from the host
//! - [`Screen`] - Text grid the terminal renders

mod contact;
mod filesystem;
mod key;
mod screen;

pub use contact::ContactForm;
pub use filesystem::{EntryDefinition, FsDefinition, FsNode};
pub use key::{KeyAction, KeyEvent};
pub use screen::Screen;
