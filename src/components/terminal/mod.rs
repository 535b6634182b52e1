mod driver;
mod surface;
mod terminal;

pub use driver::{BrowserEngine, EngineHandle, drive};
pub use surface::ScreenSurface;
pub use terminal::Terminal;
