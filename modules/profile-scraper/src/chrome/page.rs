use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use chromiumoxide::Page;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use profile_common::{AccomplishmentCategory, RawRecord, ScrapeError, Section};

use super::{scripts, selectors};
use crate::traits::ProfilePage;

const SELECTOR_POLL_INTERVAL: Duration = Duration::from_millis(100);
const CONTACT_MODAL_TIMEOUT: Duration = Duration::from_secs(3);
const PANEL_EXPAND_DELAY: Duration = Duration::from_millis(300);

pub struct ChromePage {
    page: Page,
}

impl ChromePage {
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    async fn evaluate<T: DeserializeOwned>(&self, script: String) -> Result<T> {
        let value = self.page.evaluate(script).await?.into_value::<T>()?;
        Ok(value)
    }

    async fn extract(&self, region: &str, selectors: &selectors::Selectors) -> Result<Vec<RawRecord>> {
        let script = scripts::extract(selectors)?;
        self.evaluate::<Vec<RawRecord>>(script)
            .await
            .map_err(|e| {
                ScrapeError::Extraction {
                    section: region.to_string(),
                    message: e.to_string(),
                }
                .into()
            })
    }

    async fn click(&self, selector: &str) -> Result<bool> {
        self.evaluate::<bool>(scripts::click(selector)?).await
    }
}

#[async_trait]
impl ProfilePage for ChromePage {
    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<bool> {
        let poll = async {
            loop {
                if self.page.find_element(selector).await.is_ok() {
                    return;
                }
                tokio::time::sleep(SELECTOR_POLL_INTERVAL).await;
            }
        };
        Ok(tokio::time::timeout(timeout, poll).await.is_ok())
    }

    async fn scroll_to_bottom(&self) -> Result<()> {
        let steps: u32 = self
            .evaluate(scripts::scroll_to_bottom())
            .await
            .map_err(|e| ScrapeError::Interaction {
                step: "scroll",
                message: e.to_string(),
            })?;
        debug!(steps, "Scrolled to bottom");
        Ok(())
    }

    async fn expand_all(&self) -> Result<()> {
        let clicked: u32 = self
            .evaluate(scripts::expand_all()?)
            .await
            .map_err(|e| ScrapeError::Interaction {
                step: "expand",
                message: e.to_string(),
            })?;
        debug!(clicked, "Expanded collapsed sections");
        Ok(())
    }

    async fn extract_section(&self, section: Section) -> Result<Vec<RawRecord>> {
        self.extract(section.as_str(), &selectors::section(section))
            .await
    }

    async fn extract_accomplishments(
        &self,
        category: AccomplishmentCategory,
    ) -> Result<Vec<RawRecord>> {
        if self.click(&selectors::panel_toggle(category)).await? {
            tokio::time::sleep(PANEL_EXPAND_DELAY).await;
        }
        self.extract(category.slug(), &selectors::panel(category))
            .await
    }

    async fn extract_contact_info(&self) -> Result<Vec<RawRecord>> {
        if !self.click(selectors::CONTACT_LINK).await? {
            debug!("No contact info link on page");
            return Ok(Vec::new());
        }

        if !self
            .wait_for_selector(selectors::CONTACT_MODAL, CONTACT_MODAL_TIMEOUT)
            .await?
        {
            warn!("Contact info overlay did not open");
            return Ok(Vec::new());
        }

        let records = self.extract("contact", &selectors::contact()).await?;
        self.click(selectors::CONTACT_DISMISS).await?;
        Ok(records)
    }

    async fn extract_connections(&self) -> Result<RawRecord> {
        let records = self
            .extract("connections", &selectors::connections())
            .await?;
        Ok(records.into_iter().next().unwrap_or_default())
    }

    async fn close(&self) -> Result<()> {
        self.page.clone().close().await?;
        Ok(())
    }
}
