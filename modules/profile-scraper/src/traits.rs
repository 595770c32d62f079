// Trait seams for the scrape pipeline's collaborators.
//
// BrowserSession opens pages; ProfilePage covers both the interaction
// primitives and per-section extraction on one page handle; ProfileCleaner
// normalizes text after assembly. The coordinator only ever talks to these,
// so tests drive it with MockSession/MockPage: no browser, no network.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;

use profile_common::{AccomplishmentCategory, Cookie, Credentials, Profile, RawRecord, Section};

/// Everything the acquisition layer needs to open one profile page.
#[derive(Debug, Clone, Copy)]
pub struct PageRequest<'a> {
    pub url: &'a str,
    pub cookies: &'a [Cookie],
    pub auth: Option<&'a Credentials>,
}

// ---------------------------------------------------------------------------
// BrowserSession
// ---------------------------------------------------------------------------

#[async_trait]
pub trait BrowserSession: Send + Sync {
    /// Open a page bound to the request's cookies and credentials and
    /// navigate it to the target URL.
    async fn open_page(&self, request: &PageRequest<'_>) -> Result<Box<dyn ProfilePage>>;
}

// ---------------------------------------------------------------------------
// ProfilePage
// ---------------------------------------------------------------------------

/// One open page, exclusively owned by a single scrape.
#[async_trait]
pub trait ProfilePage: Send + Sync {
    /// Wait up to `timeout` for `selector` to appear.
    /// `Ok(false)` means the wait timed out.
    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<bool>;

    /// Scroll until lazily loaded content has materialized.
    async fn scroll_to_bottom(&self) -> Result<()>;

    /// Click every collapsed "see more" control on the page.
    async fn expand_all(&self) -> Result<()>;

    /// Extract all records of one section. No data is an empty vec.
    async fn extract_section(&self, section: Section) -> Result<Vec<RawRecord>>;

    /// Extract the items of one accomplishment panel.
    async fn extract_accomplishments(
        &self,
        category: AccomplishmentCategory,
    ) -> Result<Vec<RawRecord>>;

    /// Extract contact info. May open an overlay on the page.
    async fn extract_contact_info(&self) -> Result<Vec<RawRecord>>;

    /// Extract connection and follower counts.
    async fn extract_connections(&self) -> Result<RawRecord>;

    /// Release the page. Called exactly once per opened page.
    async fn close(&self) -> Result<()>;
}

// ---------------------------------------------------------------------------
// ProfileCleaner
// ---------------------------------------------------------------------------

/// Final text normalization pass. Must return the same shape it receives
/// and never drop a top-level field.
pub trait ProfileCleaner: Send + Sync {
    fn clean(&self, profile: Profile) -> Profile;
}
