use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("Page acquisition failed for {url}: {message}")]
    PageAcquisition { url: String, message: String },

    #[error("Interaction failed ({step}): {message}")]
    Interaction { step: &'static str, message: String },

    #[error("Extraction failed for section {section}: {message}")]
    Extraction { section: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),
}
