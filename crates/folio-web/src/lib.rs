//! Browser binding: a [`PageHost`](folio_core::PageHost) over the real DOM
//! and a `ComicViewer` class exported to JavaScript.

mod dom;
mod logging;
mod runtime;

pub use dom::{ElementIds, ViewerElements, WebDocument};
pub use logging::init_logging;
pub use runtime::ComicViewer;
