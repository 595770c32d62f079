use thiserror::Error;

pub type Result<T> = std::result::Result<T, BrowserlessError>;

#[derive(Debug, Error)]
pub enum BrowserlessError {
    #[error("Invalid Browserless URL {url}: {message}")]
    InvalidUrl { url: String, message: String },

    #[error("CDP error: {0}")]
    Cdp(String),

    #[error("Failed to launch Chromium: {0}")]
    Launch(String),
}

impl From<chromiumoxide::error::CdpError> for BrowserlessError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        BrowserlessError::Cdp(err.to_string())
    }
}
