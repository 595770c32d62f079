use anyhow::Result;
use async_trait::async_trait;
use base64::Engine;
use chromiumoxide::cdp::browser_protocol::network::{
    CookieParam, Headers, SetCookiesParams, SetExtraHttpHeadersParams,
};
use chromiumoxide::Page;
use tracing::{info, warn};

use browserless_client::{BrowserConnection, BrowserlessClient};
use profile_common::{Credentials, PageBackend, ScrapeError};

use super::page::ChromePage;
use crate::traits::{BrowserSession, PageRequest, ProfilePage};

/// Browser session over CDP. Each `open_page` call gets its own tab, so
/// concurrent scrapes never share a page.
pub struct ChromeSession {
    connection: BrowserConnection,
}

impl ChromeSession {
    pub fn new(connection: BrowserConnection) -> Self {
        Self { connection }
    }

    /// Connect to the configured backend.
    pub async fn connect(backend: &PageBackend) -> Result<Self> {
        let connection = match backend {
            PageBackend::Chrome => browserless_client::launch_local().await?,
            PageBackend::Browserless { base_url, token } => {
                BrowserlessClient::new(base_url, token.as_deref())
                    .connect()
                    .await?
            }
        };
        Ok(Self::new(connection))
    }

    pub async fn close(self) -> Result<()> {
        self.connection.close().await?;
        Ok(())
    }
}

#[async_trait]
impl BrowserSession for ChromeSession {
    async fn open_page(&self, request: &PageRequest<'_>) -> Result<Box<dyn ProfilePage>> {
        let page = self
            .connection
            .browser()
            .new_page("about:blank")
            .await
            .map_err(|e| acquisition_error(request.url, e))?;

        if let Err(e) = prepare_and_navigate(&page, request).await {
            if let Err(close_err) = page.clone().close().await {
                warn!(url = request.url, error = %close_err, "Failed to close page after navigation error");
            }
            return Err(acquisition_error(request.url, e).into());
        }

        info!(url = request.url, "Page opened");
        Ok(Box::new(ChromePage::new(page)))
    }
}

async fn prepare_and_navigate(page: &Page, request: &PageRequest<'_>) -> Result<()> {
    if let Some(credentials) = request.auth {
        page.execute(SetExtraHttpHeadersParams::new(Headers::new(
            serde_json::json!({ "Authorization": basic_auth(credentials) }),
        )))
        .await?;
    }

    if !request.cookies.is_empty() {
        page.execute(SetCookiesParams::new(cookie_params(request)))
            .await?;
    }

    page.goto(request.url).await?;
    Ok(())
}

fn acquisition_error(url: &str, err: impl std::fmt::Display) -> ScrapeError {
    ScrapeError::PageAcquisition {
        url: url.to_string(),
        message: err.to_string(),
    }
}

fn cookie_params(request: &PageRequest<'_>) -> Vec<CookieParam> {
    request
        .cookies
        .iter()
        .map(|cookie| {
            let mut param = CookieParam::new(cookie.name.clone(), cookie.value.clone());
            match &cookie.domain {
                Some(domain) => param.domain = Some(domain.clone()),
                None => param.url = Some(request.url.to_string()),
            }
            param
        })
        .collect()
}

fn basic_auth(credentials: &Credentials) -> String {
    let raw = format!("{}:{}", credentials.username, credentials.password);
    format!(
        "Basic {}",
        base64::engine::general_purpose::STANDARD.encode(raw)
    )
}
