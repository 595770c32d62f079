pub mod assembler;
pub mod chrome;
pub mod cleaner;
pub mod pipeline;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;
pub mod traits;

pub use pipeline::{scrape_profile, ProfileScraper, ScrapeOptions};
