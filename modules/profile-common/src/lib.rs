pub mod config;
pub mod error;
pub mod types;

pub use config::{Config, PageBackend};
pub use error::ScrapeError;
pub use types::*;
