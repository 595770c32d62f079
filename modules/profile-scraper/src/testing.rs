// Test mocks for the scrape pipeline.
//
// Two mocks matching the two browser-side trait boundaries:
// - MockSession (BrowserSession): hands out clones of one MockPage, or fails
// - MockPage (ProfilePage): canned records per section plus a shared call log
//
// Plus `record()` for building RawRecords from JSON literals.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{bail, Result};
use async_trait::async_trait;
use tokio::time::Instant;

use profile_common::{AccomplishmentCategory, RawRecord, Section};

use crate::traits::{BrowserSession, PageRequest, ProfilePage};

/// Build a RawRecord from a JSON object literal. Panics on non-objects.
pub fn record(value: serde_json::Value) -> RawRecord {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("record() needs a JSON object, got {other}"),
    }
}

// ---------------------------------------------------------------------------
// Call log
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Open(String),
    WaitForSelector(String),
    Scroll,
    Expand,
    Section(Section),
    Panel(AccomplishmentCategory),
    Contact,
    Connections,
    Close,
}

#[derive(Debug, Clone, Default)]
pub struct CallLog {
    entries: Arc<Mutex<Vec<(Call, Instant)>>>,
}

impl CallLog {
    fn push(&self, call: Call) {
        self.entries.lock().unwrap().push((call, Instant::now()));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .map(|(c, _)| c.clone())
            .collect()
    }

    pub fn count(&self, call: &Call) -> usize {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter(|(c, _)| c == call)
            .count()
    }

    /// When `call` first happened, on tokio's (possibly paused) clock.
    pub fn first_at(&self, call: &Call) -> Option<Instant> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .find(|(c, _)| c == call)
            .map(|(_, at)| *at)
    }
}

// ---------------------------------------------------------------------------
// MockPage
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    Present,
    TimesOut,
    Errors,
}

/// In-memory page. Unregistered sections return no records.
/// Builder pattern: `.on_section()`, `.on_panel()`, `.fail_section()`, ...
#[derive(Clone)]
pub struct MockPage {
    log: CallLog,
    marker: Marker,
    sections: HashMap<Section, Vec<RawRecord>>,
    panels: HashMap<AccomplishmentCategory, Vec<RawRecord>>,
    contact: Vec<RawRecord>,
    connections: RawRecord,
    failing_sections: HashMap<Section, String>,
    fail_close: bool,
}

impl MockPage {
    pub fn new() -> Self {
        Self {
            log: CallLog::default(),
            marker: Marker::Present,
            sections: HashMap::new(),
            panels: HashMap::new(),
            contact: Vec::new(),
            connections: RawRecord::new(),
            failing_sections: HashMap::new(),
            fail_close: false,
        }
    }

    pub fn log(&self) -> CallLog {
        self.log.clone()
    }

    /// The structural marker never shows up; the wait reports a timeout.
    pub fn marker_times_out(mut self) -> Self {
        self.marker = Marker::TimesOut;
        self
    }

    /// The marker wait itself errors.
    pub fn marker_errors(mut self) -> Self {
        self.marker = Marker::Errors;
        self
    }

    pub fn on_section(mut self, section: Section, records: Vec<RawRecord>) -> Self {
        self.sections.insert(section, records);
        self
    }

    pub fn on_panel(mut self, category: AccomplishmentCategory, records: Vec<RawRecord>) -> Self {
        self.panels.insert(category, records);
        self
    }

    pub fn on_contact(mut self, records: Vec<RawRecord>) -> Self {
        self.contact = records;
        self
    }

    pub fn on_connections(mut self, record: RawRecord) -> Self {
        self.connections = record;
        self
    }

    pub fn fail_section(mut self, section: Section, message: &str) -> Self {
        self.failing_sections.insert(section, message.to_string());
        self
    }

    pub fn fail_close(mut self) -> Self {
        self.fail_close = true;
        self
    }
}

impl Default for MockPage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProfilePage for MockPage {
    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<bool> {
        self.log.push(Call::WaitForSelector(selector.to_string()));
        match self.marker {
            Marker::Present => Ok(true),
            Marker::TimesOut => {
                tokio::time::sleep(timeout).await;
                Ok(false)
            }
            Marker::Errors => bail!("MockPage: selector query failed"),
        }
    }

    async fn scroll_to_bottom(&self) -> Result<()> {
        self.log.push(Call::Scroll);
        Ok(())
    }

    async fn expand_all(&self) -> Result<()> {
        self.log.push(Call::Expand);
        Ok(())
    }

    async fn extract_section(&self, section: Section) -> Result<Vec<RawRecord>> {
        self.log.push(Call::Section(section));
        if let Some(message) = self.failing_sections.get(&section) {
            bail!("{message}");
        }
        Ok(self.sections.get(&section).cloned().unwrap_or_default())
    }

    async fn extract_accomplishments(
        &self,
        category: AccomplishmentCategory,
    ) -> Result<Vec<RawRecord>> {
        self.log.push(Call::Panel(category));
        Ok(self.panels.get(&category).cloned().unwrap_or_default())
    }

    async fn extract_contact_info(&self) -> Result<Vec<RawRecord>> {
        self.log.push(Call::Contact);
        Ok(self.contact.clone())
    }

    async fn extract_connections(&self) -> Result<RawRecord> {
        self.log.push(Call::Connections);
        Ok(self.connections.clone())
    }

    async fn close(&self) -> Result<()> {
        self.log.push(Call::Close);
        if self.fail_close {
            bail!("MockPage: close failed");
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// MockSession
// ---------------------------------------------------------------------------

/// Hands out clones of one MockPage (sharing its call log), or fails every
/// open when built with `failing`.
pub struct MockSession {
    page: MockPage,
    open_error: Option<String>,
}

impl MockSession {
    pub fn new(page: MockPage) -> Self {
        Self {
            page,
            open_error: None,
        }
    }

    pub fn failing(page: MockPage, message: &str) -> Self {
        Self {
            page,
            open_error: Some(message.to_string()),
        }
    }
}

#[async_trait]
impl BrowserSession for MockSession {
    async fn open_page(&self, request: &PageRequest<'_>) -> Result<Box<dyn ProfilePage>> {
        self.page.log.push(Call::Open(request.url.to_string()));
        if let Some(ref message) = self.open_error {
            bail!("{message}");
        }
        Ok(Box::new(self.page.clone()))
    }
}
