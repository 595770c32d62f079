use std::env;
use std::time::Duration;

use crate::error::ScrapeError;
use crate::types::{Cookie, Credentials};

/// Name of the session cookie the profile site authenticates with.
pub const SESSION_COOKIE_NAME: &str = "li_at";

const DEFAULT_COOKIE_DOMAIN: &str = ".www.linkedin.com";
const DEFAULT_PACING_MS: u64 = 500;
const DEFAULT_CONCURRENCY: usize = 2;

/// Which browser the scraper drives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageBackend {
    /// Launch a local headless Chromium.
    Chrome,
    /// Connect to a remote Browserless instance over CDP.
    Browserless {
        base_url: String,
        token: Option<String>,
    },
}

/// Scraper configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub page_backend: PageBackend,

    // Session
    pub session_cookie: String,
    pub cookie_domain: String,
    pub proxy_username: Option<String>,
    pub proxy_password: Option<String>,

    // Pipeline
    pub pacing_ms: u64,
    pub include_contact: bool,
    pub concurrency: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ScrapeError> {
        dotenvy::dotenv().ok();

        let page_backend = match env::var("BROWSERLESS_URL").ok().filter(|v| !v.is_empty()) {
            Some(base_url) => PageBackend::Browserless {
                base_url,
                token: env::var("BROWSERLESS_TOKEN").ok().filter(|v| !v.is_empty()),
            },
            None => PageBackend::Chrome,
        };

        let config = Self {
            page_backend,
            session_cookie: required_env("PROFILE_SESSION_COOKIE")?,
            cookie_domain: env::var("PROFILE_COOKIE_DOMAIN")
                .unwrap_or_else(|_| DEFAULT_COOKIE_DOMAIN.to_string()),
            proxy_username: env::var("PROXY_USERNAME").ok(),
            proxy_password: env::var("PROXY_PASSWORD").ok(),
            pacing_ms: parse_number(
                "SCRAPE_PACING_MS",
                env::var("SCRAPE_PACING_MS").ok(),
                DEFAULT_PACING_MS,
            )?,
            include_contact: parse_flag(env::var("SCRAPE_INCLUDE_CONTACT").ok()),
            concurrency: parse_number(
                "SCRAPE_CONCURRENCY",
                env::var("SCRAPE_CONCURRENCY").ok(),
                DEFAULT_CONCURRENCY,
            )?
            .max(1),
        };

        config.log_keys();
        Ok(config)
    }

    pub fn pacing(&self) -> Duration {
        Duration::from_millis(self.pacing_ms)
    }

    /// Cookies injected into every page.
    pub fn cookies(&self) -> Vec<Cookie> {
        vec![Cookie::new(SESSION_COOKIE_NAME, &self.session_cookie)
            .with_domain(&self.cookie_domain)]
    }

    /// Credentials for the page-acquisition layer, when both halves are set.
    pub fn credentials(&self) -> Option<Credentials> {
        match (&self.proxy_username, &self.proxy_password) {
            (Some(username), Some(password)) => Some(Credentials {
                username: username.clone(),
                password: password.clone(),
            }),
            _ => None,
        }
    }

    fn log_keys(&self) {
        fn preview_opt(val: &Option<String>) -> String {
            match val {
                Some(v) if !v.is_empty() => preview(v),
                _ => "<not set>".to_string(),
            }
        }

        tracing::info!("Config loaded:");
        match &self.page_backend {
            PageBackend::Chrome => tracing::info!("  BROWSER: local chromium"),
            PageBackend::Browserless { base_url, token } => {
                tracing::info!("  BROWSERLESS_URL: {}", base_url);
                tracing::info!("  BROWSERLESS_TOKEN: {}", preview_opt(token));
            }
        }
        tracing::info!("  PROFILE_SESSION_COOKIE: {}", preview(&self.session_cookie));
        tracing::info!("  PROXY_USERNAME: {}", preview_opt(&self.proxy_username));
        tracing::info!(
            pacing_ms = self.pacing_ms,
            include_contact = self.include_contact,
            concurrency = self.concurrency,
            "  pipeline settings"
        );
    }
}

fn required_env(key: &str) -> Result<String, ScrapeError> {
    env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ScrapeError::Config(format!("{key} environment variable is required")))
}

fn parse_flag(raw: Option<String>) -> bool {
    matches!(
        raw.as_deref().map(str::trim).map(str::to_ascii_lowercase).as_deref(),
        Some("1" | "true" | "yes" | "on")
    )
}

fn parse_number<T: std::str::FromStr>(
    key: &str,
    raw: Option<String>,
    default: T,
) -> Result<T, ScrapeError> {
    match raw {
        None => Ok(default),
        Some(v) if v.trim().is_empty() => Ok(default),
        Some(v) => v
            .trim()
            .parse()
            .map_err(|_| ScrapeError::Config(format!("{key} must be a number, got {v:?}"))),
    }
}

/// First few characters of a secret plus its length, for startup logs.
fn preview(val: &str) -> String {
    let head: String = val.chars().take(5).collect();
    format!("{head}...({} chars)", val.chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            page_backend: PageBackend::Chrome,
            session_cookie: "AQEDAR".into(),
            cookie_domain: DEFAULT_COOKIE_DOMAIN.into(),
            proxy_username: None,
            proxy_password: None,
            pacing_ms: DEFAULT_PACING_MS,
            include_contact: false,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    #[test]
    fn preview_truncates_on_char_boundaries() {
        assert_eq!(preview("ÉÉÉ"), "ÉÉÉ...(3 chars)");
        assert_eq!(preview("ÀBÇDÉFG"), "ÀBÇDÉ...(7 chars)");
        assert_eq!(preview("AQEDARtoken"), "AQEDA...(11 chars)");
    }

    #[test]
    fn flag_accepts_common_truthy_values() {
        assert!(parse_flag(Some("true".into())));
        assert!(parse_flag(Some(" YES ".into())));
        assert!(parse_flag(Some("1".into())));
        assert!(!parse_flag(Some("0".into())));
        assert!(!parse_flag(Some("nope".into())));
        assert!(!parse_flag(None));
    }

    #[test]
    fn number_falls_back_to_default_when_unset() {
        assert_eq!(parse_number::<u64>("X", None, 500).unwrap(), 500);
        assert_eq!(parse_number::<u64>("X", Some("  ".into()), 500).unwrap(), 500);
        assert_eq!(parse_number::<u64>("X", Some("0".into()), 500).unwrap(), 0);
    }

    #[test]
    fn number_rejects_garbage() {
        let err = parse_number::<u64>("SCRAPE_PACING_MS", Some("fast".into()), 500).unwrap_err();
        assert!(err.to_string().contains("SCRAPE_PACING_MS"));
    }

    #[test]
    fn session_cookie_is_scoped_to_domain() {
        let cookies = config().cookies();
        assert_eq!(cookies.len(), 1);
        assert_eq!(cookies[0].name, SESSION_COOKIE_NAME);
        assert_eq!(cookies[0].domain.as_deref(), Some(DEFAULT_COOKIE_DOMAIN));
    }

    #[test]
    fn credentials_need_both_halves() {
        let mut cfg = config();
        cfg.proxy_username = Some("user".into());
        assert!(cfg.credentials().is_none());

        cfg.proxy_password = Some("pass".into());
        let creds = cfg.credentials().unwrap();
        assert_eq!(creds.username, "user");
        assert_eq!(creds.password, "pass");
    }
}
