pub mod error;

pub use error::{BrowserlessError, Result};

use chromiumoxide::{Browser, BrowserConfig, Handler};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use url::Url;

pub struct BrowserlessClient {
    base_url: String,
    token: Option<String>,
}

impl BrowserlessClient {
    pub fn new(base_url: &str, token: Option<&str>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.map(String::from),
        }
    }

    /// CDP websocket endpoint for this instance: `http(s)` becomes `ws(s)`,
    /// and the token rides along as a query parameter.
    pub fn ws_endpoint(&self) -> Result<String> {
        let mut url = Url::parse(&self.base_url).map_err(|e| BrowserlessError::InvalidUrl {
            url: self.base_url.clone(),
            message: e.to_string(),
        })?;

        let scheme = match url.scheme() {
            "http" | "ws" => "ws",
            "https" | "wss" => "wss",
            other => {
                return Err(BrowserlessError::InvalidUrl {
                    url: self.base_url.clone(),
                    message: format!("unsupported scheme {other}"),
                })
            }
        };
        url.set_scheme(scheme)
            .map_err(|_| BrowserlessError::InvalidUrl {
                url: self.base_url.clone(),
                message: "cannot rewrite scheme".to_string(),
            })?;

        if let Some(ref token) = self.token {
            url.query_pairs_mut().append_pair("token", token);
        }

        Ok(url.to_string())
    }

    /// Open a CDP connection to the Browserless instance.
    pub async fn connect(&self) -> Result<BrowserConnection> {
        let endpoint = self.ws_endpoint()?;
        info!(base_url = %self.base_url, "Connecting to Browserless");
        let (browser, handler) = Browser::connect(endpoint).await?;
        Ok(BrowserConnection::new(browser, handler))
    }
}

/// Launch a local headless Chromium and connect to it.
pub async fn launch_local() -> Result<BrowserConnection> {
    let config = BrowserConfig::builder()
        .no_sandbox()
        .build()
        .map_err(BrowserlessError::Launch)?;
    info!("Launching local Chromium");
    let (browser, handler) = Browser::launch(config).await?;
    Ok(BrowserConnection::new(browser, handler))
}

/// A live browser plus the task pumping its CDP event stream.
pub struct BrowserConnection {
    browser: Browser,
    handler_task: JoinHandle<()>,
}

impl BrowserConnection {
    fn new(browser: Browser, handler: Handler) -> Self {
        Self {
            browser,
            handler_task: spawn_handler_task(handler),
        }
    }

    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    /// Close the browser and stop the handler task.
    pub async fn close(mut self) -> Result<()> {
        let closed = self.browser.close().await;
        self.handler_task.abort();
        closed?;
        Ok(())
    }
}

fn spawn_handler_task(mut handler: Handler) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = handler.next().await {
            if let Err(e) = event {
                warn!(error = %e, "CDP handler event error");
            }
        }
    })
}
