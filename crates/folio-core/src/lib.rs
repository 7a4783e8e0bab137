pub mod catalog;
pub mod config;
pub mod consts;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod headless;
pub mod host;
pub mod input;
pub mod observer;
pub mod registry;
pub mod state;
pub mod timers;
pub mod transform;
pub mod viewer;

pub use catalog::PageCatalog;
pub use config::ViewerConfig;
pub use error::{FolioError, Result};
pub use host::PageHost;
pub use input::{Handled, InputEvent};
pub use viewer::Viewer;
