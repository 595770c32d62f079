pub mod bag;
pub mod coordinator;
pub mod steps;

pub use bag::RawProfileBag;
pub use coordinator::{scrape_profile, ProfileScraper, ScrapeOptions, PROFILE_MARKER};
pub use steps::{Step, StepFailure, StepPolicy};
