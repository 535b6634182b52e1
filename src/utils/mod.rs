//! Utility modules for web, DOM, and data structure operations.
//!
//! Provides:
//! - [`RingBuffer`] - Fixed-capacity circular buffer for the scrollback
//! - [`post_json`] - Network submission with timeout
//! - [`BrowserNavigator`] - Opens external links in a new tab

pub mod dom;
mod fetch;
mod ring_buffer;

pub use dom::BrowserNavigator;
pub use fetch::post_json;
pub use ring_buffer::RingBuffer;
