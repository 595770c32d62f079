//! Chromium backend: CDP pages, interaction scripts and the per-section
//! selector table.

mod page;
pub mod scripts;
pub mod selectors;
mod session;

pub use page::ChromePage;
pub use session::ChromeSession;
