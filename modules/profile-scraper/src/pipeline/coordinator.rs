use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::{debug, info, warn};
use typed_builder::TypedBuilder;

use profile_common::{AccomplishmentCategory, Cookie, Credentials, Profile, RawRecord, Section};

use crate::assembler::assemble;
use crate::cleaner::TextCleaner;
use crate::pipeline::bag::RawProfileBag;
use crate::pipeline::steps::{run_step, Step, StepFailure};
use crate::traits::{BrowserSession, PageRequest, ProfileCleaner, ProfilePage};

/// Selector whose presence signals a rendered profile page.
pub const PROFILE_MARKER: &str = ".pv-profile-section";

pub const DEFAULT_PACING: Duration = Duration::from_millis(500);
pub const DEFAULT_MARKER_TIMEOUT: Duration = Duration::from_secs(5);

/// Sections extracted before the accomplishment panels, in order.
const LEADING_SECTIONS: [Section; 9] = [
    Section::Profile,
    Section::About,
    Section::Positions,
    Section::Educations,
    Section::RecommendationsCount,
    Section::RecommendationsReceived,
    Section::RecommendationsGiven,
    Section::Skills,
    Section::Accomplishments,
];

/// Sections extracted after the accomplishment panels, in order.
const TRAILING_SECTIONS: [Section; 2] = [Section::VolunteerExperience, Section::PeopleAlsoViewed];

#[derive(Debug, Clone, TypedBuilder)]
pub struct ScrapeOptions {
    /// Total pause split evenly around the expand step. Zero disables it.
    #[builder(default = DEFAULT_PACING)]
    pub pacing: Duration,
    /// Contact info needs an extra overlay interaction, so it is opt-in.
    #[builder(default)]
    pub include_contact: bool,
    #[builder(default)]
    pub auth: Option<Credentials>,
    #[builder(default = DEFAULT_MARKER_TIMEOUT)]
    pub marker_timeout: Duration,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Drives one page through readiness, interaction and extraction, then
/// assembles the result. Holds no per-scrape state, so one instance can
/// serve concurrent scrapes.
pub struct ProfileScraper {
    cleaner: Arc<dyn ProfileCleaner>,
}

impl Default for ProfileScraper {
    fn default() -> Self {
        Self::new(Arc::new(TextCleaner::new()))
    }
}

impl ProfileScraper {
    pub fn new(cleaner: Arc<dyn ProfileCleaner>) -> Self {
        Self { cleaner }
    }

    pub async fn scrape_profile(
        &self,
        session: &dyn BrowserSession,
        cookies: &[Cookie],
        url: &str,
        options: &ScrapeOptions,
    ) -> Result<Profile> {
        info!(url, "Starting profile scrape");

        let request = PageRequest {
            url,
            cookies,
            auth: options.auth.as_ref(),
        };
        let page = session.open_page(&request).await?;

        let collected = collect(page.as_ref(), options).await;
        let closed = page.close().await;

        let bag = match (collected, closed) {
            (Ok(bag), Ok(())) => bag,
            (Ok(_), Err(e)) => return Err(e),
            (Err(e), closed) => {
                if let Err(close_err) = closed {
                    warn!(url, error = %close_err, "Failed to close page after scrape error");
                }
                return Err(e);
            }
        };

        info!(url, "Finished profile scrape");
        Ok(self.cleaner.clean(assemble(bag)))
    }
}

/// Scrape with the default text cleaner.
pub async fn scrape_profile(
    session: &dyn BrowserSession,
    cookies: &[Cookie],
    url: &str,
    options: &ScrapeOptions,
) -> Result<Profile> {
    ProfileScraper::default()
        .scrape_profile(session, cookies, url, options)
        .await
}

async fn collect(page: &dyn ProfilePage, options: &ScrapeOptions) -> Result<RawProfileBag> {
    attempt(Step::Readiness, async {
        if page
            .wait_for_selector(PROFILE_MARKER, options.marker_timeout)
            .await?
        {
            Ok(())
        } else {
            anyhow::bail!(
                "profile selector {PROFILE_MARKER} was not found within {:?}",
                options.marker_timeout
            )
        }
    })
    .await?;

    info!("Scrolling page to the bottom");
    attempt(Step::Scroll, page.scroll_to_bottom()).await?;
    pace(options.pacing, "1st").await;

    attempt(Step::Expand, page.expand_all()).await?;
    pace(options.pacing, "2nd (and last)").await;

    let mut bag = RawProfileBag::default();

    for section in LEADING_SECTIONS {
        *bag.section_mut(section) = extract_section(page, section).await?;
    }

    for category in AccomplishmentCategory::ALL {
        let records = attempt(Step::Panel(category), page.extract_accomplishments(category)).await?;
        debug!(panel = %category, records = records.len(), "Extracted accomplishment panel");
        *bag.panel_mut(category) = records;
    }

    for section in TRAILING_SECTIONS {
        *bag.section_mut(section) = extract_section(page, section).await?;
    }

    bag.contact = if options.include_contact {
        attempt(Step::Contact, page.extract_contact_info()).await?
    } else {
        Vec::new()
    };

    bag.connections = attempt(Step::Connections, page.extract_connections()).await?;

    Ok(bag)
}

async fn extract_section(page: &dyn ProfilePage, section: Section) -> Result<Vec<RawRecord>> {
    let records = attempt(Step::Section(section), page.extract_section(section)).await?;
    debug!(section = %section, records = records.len(), "Extracted section");
    Ok(records)
}

/// Run a step under its policy: soft failures are logged and yield the
/// default value, hard failures propagate unchanged.
async fn attempt<T, F>(step: Step, fut: F) -> Result<T>
where
    T: Default,
    F: std::future::Future<Output = Result<T>>,
{
    match run_step(step, fut).await {
        Ok(value) => Ok(value),
        Err(StepFailure::Soft { step, error }) => {
            warn!(step = %step, error = %error, "Tolerated step failed, continuing");
            Ok(T::default())
        }
        Err(failure) => Err(failure.into_error()),
    }
}

/// Sleep for half the pacing budget. Skipped entirely when pacing is zero.
async fn pace(pacing: Duration, label: &str) {
    if pacing.is_zero() {
        return;
    }
    info!("applying {label} delay");
    tokio::time::sleep(pacing / 2).await;
}
