//! Pipeline tests against MockSession/MockPage.
//!
//! No browser, no network: every collaborator is an in-memory mock with a
//! shared call log, and pacing runs on tokio's paused clock.

use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::json;
use tracing_subscriber::fmt::MakeWriter;

use profile_common::{AccomplishmentCategory, Cookie, Section};
use profile_scraper::pipeline::PROFILE_MARKER;
use profile_scraper::testing::{record, Call, MockPage, MockSession};
use profile_scraper::{scrape_profile, ScrapeOptions};

const URL: &str = "https://www.linkedin.com/in/ada-lovelace/";

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Route tracing output for the current thread into a buffer.
fn capture_logs() -> (LogBuffer, tracing::subscriber::DefaultGuard) {
    let buffer = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(buffer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (buffer, guard)
}

fn cookies() -> Vec<Cookie> {
    vec![Cookie::new("li_at", "AQEDAR").with_domain(".www.linkedin.com")]
}

fn no_pacing() -> ScrapeOptions {
    ScrapeOptions::builder().pacing(Duration::ZERO).build()
}

// ---------------------------------------------------------------------------
// Readiness marker
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn marker_timeout_warns_and_still_completes() {
    let (logs, _guard) = capture_logs();
    let page = MockPage::new()
        .marker_times_out()
        .on_section(Section::Profile, vec![record(json!({"name": "Ada Lovelace"}))]);
    let log = page.log();
    let session = MockSession::new(page);

    let profile = scrape_profile(&session, &cookies(), URL, &ScrapeOptions::default())
        .await
        .expect("marker timeout must not abort the scrape");

    assert_eq!(
        profile.profile.and_then(|p| p.name).as_deref(),
        Some("Ada Lovelace")
    );
    assert_eq!(log.count(&Call::WaitForSelector(PROFILE_MARKER.to_string())), 1);
    assert_eq!(log.count(&Call::Connections), 1);

    let output = logs.contents();
    assert!(output.contains("WARN"), "expected a warning, got:\n{output}");
    assert!(output.contains("readiness"));
    assert!(output.contains("was not found"));
}

#[tokio::test]
async fn marker_query_error_is_tolerated() {
    let page = MockPage::new().marker_errors();
    let log = page.log();
    let session = MockSession::new(page);

    let result = scrape_profile(&session, &cookies(), URL, &no_pacing()).await;

    assert!(result.is_ok());
    assert_eq!(log.count(&Call::Close), 1);
}

#[tokio::test(start_paused = true)]
async fn marker_timeout_with_all_sections_empty_yields_complete_record() {
    let session = MockSession::new(MockPage::new().marker_times_out());

    let profile = scrape_profile(&session, &cookies(), URL, &no_pacing())
        .await
        .unwrap();

    let json = serde_json::to_value(&profile).unwrap();
    let obj = json.as_object().unwrap();
    assert_eq!(obj.len(), 19, "every top-level field is present");
    assert!(json["profile"].is_null());
    assert!(json["about"].is_null());
    assert_eq!(json["positions"], json!([]));
    assert_eq!(json["testScores"], json!([]));
    assert_eq!(json["contact"], json!([]));
    assert_eq!(json["recommendations"]["givenCount"], "0");
    assert_eq!(json["recommendations"]["receivedCount"], "0");
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

#[tokio::test]
async fn steps_run_in_fixed_order() {
    let page = MockPage::new();
    let log = page.log();
    let session = MockSession::new(page);

    scrape_profile(&session, &cookies(), URL, &no_pacing())
        .await
        .unwrap();

    let mut expected = vec![
        Call::Open(URL.to_string()),
        Call::WaitForSelector(PROFILE_MARKER.to_string()),
        Call::Scroll,
        Call::Expand,
        Call::Section(Section::Profile),
        Call::Section(Section::About),
        Call::Section(Section::Positions),
        Call::Section(Section::Educations),
        Call::Section(Section::RecommendationsCount),
        Call::Section(Section::RecommendationsReceived),
        Call::Section(Section::RecommendationsGiven),
        Call::Section(Section::Skills),
        Call::Section(Section::Accomplishments),
    ];
    expected.extend(AccomplishmentCategory::ALL.into_iter().map(Call::Panel));
    expected.extend([
        Call::Section(Section::VolunteerExperience),
        Call::Section(Section::PeopleAlsoViewed),
        Call::Connections,
        Call::Close,
    ]);

    assert_eq!(log.calls(), expected);
}

// ---------------------------------------------------------------------------
// Assembly through the pipeline
// ---------------------------------------------------------------------------

#[tokio::test]
async fn recommendations_are_cross_assigned() {
    let page = MockPage::new()
        .on_section(
            Section::RecommendationsReceived,
            vec![record(json!({"name": "R1"}))],
        )
        .on_section(
            Section::RecommendationsGiven,
            vec![record(json!({"name": "G1"}))],
        );
    let session = MockSession::new(page);

    let profile = scrape_profile(&session, &cookies(), URL, &no_pacing())
        .await
        .unwrap();
    let recs = profile.recommendations;

    assert_eq!(recs.received.len(), 1);
    assert_eq!(recs.received[0].name.as_deref(), Some("G1"));
    assert_eq!(recs.given.len(), 1);
    assert_eq!(recs.given[0].name.as_deref(), Some("R1"));
    assert_eq!(recs.given_count, "0");
    assert_eq!(recs.received_count, "0");
}

#[tokio::test]
async fn extracted_text_is_cleaned() {
    let page = MockPage::new()
        .on_section(
            Section::Positions,
            vec![
                record(json!({"title": "  Chief\n  Analyst ", "description": "Engines…see more"})),
                record(json!({"title": "   "})),
            ],
        )
        .on_panel(
            AccomplishmentCategory::Languages,
            vec![record(json!({"name": "French"}))],
        )
        .on_connections(record(json!({"count": "500+"})));
    let session = MockSession::new(page);

    let profile = scrape_profile(&session, &cookies(), URL, &no_pacing())
        .await
        .unwrap();

    assert_eq!(profile.positions.len(), 1);
    assert_eq!(profile.positions[0].title.as_deref(), Some("Chief Analyst"));
    assert_eq!(profile.positions[0].description.as_deref(), Some("Engines"));
    assert_eq!(profile.languages[0].name.as_deref(), Some("French"));
    assert_eq!(profile.connections.count.as_deref(), Some("500+"));
}

// ---------------------------------------------------------------------------
// Contact gating
// ---------------------------------------------------------------------------

#[tokio::test]
async fn contact_is_skipped_by_default() {
    let page = MockPage::new().on_contact(vec![record(
        json!({"type": "Email", "values": ["ada@example.com"]}),
    )]);
    let log = page.log();
    let session = MockSession::new(page);

    let profile = scrape_profile(&session, &cookies(), URL, &no_pacing())
        .await
        .unwrap();

    assert_eq!(log.count(&Call::Contact), 0);
    assert!(profile.contact.is_empty());
}

#[tokio::test]
async fn contact_is_extracted_once_when_requested() {
    let page = MockPage::new().on_contact(vec![record(
        json!({"type": "Email", "values": ["ada@example.com"]}),
    )]);
    let log = page.log();
    let session = MockSession::new(page);
    let options = ScrapeOptions::builder()
        .pacing(Duration::ZERO)
        .include_contact(true)
        .build();

    let profile = scrape_profile(&session, &cookies(), URL, &options)
        .await
        .unwrap();

    assert_eq!(log.count(&Call::Contact), 1);
    assert_eq!(profile.contact.len(), 1);
    assert_eq!(profile.contact[0].kind.as_deref(), Some("Email"));
    assert_eq!(profile.contact[0].values, vec!["ada@example.com"]);
}

// ---------------------------------------------------------------------------
// Page release and error propagation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn page_is_closed_once_on_success() {
    let page = MockPage::new();
    let log = page.log();
    let session = MockSession::new(page);

    scrape_profile(&session, &cookies(), URL, &no_pacing())
        .await
        .unwrap();

    assert_eq!(log.count(&Call::Close), 1);
}

#[tokio::test]
async fn section_failure_propagates_after_closing_page() {
    let page = MockPage::new().fail_section(Section::Skills, "skills node detached");
    let log = page.log();
    let session = MockSession::new(page);

    let err = scrape_profile(&session, &cookies(), URL, &no_pacing())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "skills node detached");
    assert_eq!(log.count(&Call::Close), 1);
    assert_eq!(log.count(&Call::Panel(AccomplishmentCategory::Courses)), 0);
    assert_eq!(log.count(&Call::Connections), 0);
}

#[tokio::test]
async fn section_error_wins_over_close_error() {
    let page = MockPage::new()
        .fail_section(Section::About, "about missing")
        .fail_close();
    let log = page.log();
    let session = MockSession::new(page);

    let err = scrape_profile(&session, &cookies(), URL, &no_pacing())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "about missing");
    assert_eq!(log.count(&Call::Close), 1);
}

#[tokio::test]
async fn close_failure_after_success_is_fatal() {
    let page = MockPage::new().fail_close();
    let session = MockSession::new(page);

    let err = scrape_profile(&session, &cookies(), URL, &no_pacing())
        .await
        .unwrap_err();

    assert!(err.to_string().contains("close failed"));
}

#[tokio::test]
async fn open_failure_propagates_without_touching_a_page() {
    let page = MockPage::new();
    let log = page.log();
    let session = MockSession::failing(page, "browser disconnected");

    let err = scrape_profile(&session, &cookies(), URL, &no_pacing())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "browser disconnected");
    assert_eq!(log.calls(), vec![Call::Open(URL.to_string())]);
}

// ---------------------------------------------------------------------------
// Pacing
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn pacing_splits_delay_around_expand() {
    let page = MockPage::new();
    let log = page.log();
    let session = MockSession::new(page);
    let options = ScrapeOptions::builder()
        .pacing(Duration::from_millis(500))
        .build();

    scrape_profile(&session, &cookies(), URL, &options)
        .await
        .unwrap();

    let scroll = log.first_at(&Call::Scroll).unwrap();
    let expand = log.first_at(&Call::Expand).unwrap();
    let first_section = log.first_at(&Call::Section(Section::Profile)).unwrap();
    assert_eq!(expand - scroll, Duration::from_millis(250));
    assert_eq!(first_section - expand, Duration::from_millis(250));
}

#[tokio::test(start_paused = true)]
async fn zero_pacing_skips_delays() {
    let (logs, _guard) = capture_logs();
    let page = MockPage::new();
    let log = page.log();
    let session = MockSession::new(page);

    scrape_profile(&session, &cookies(), URL, &no_pacing())
        .await
        .unwrap();

    let scroll = log.first_at(&Call::Scroll).unwrap();
    let first_section = log.first_at(&Call::Section(Section::Profile)).unwrap();
    assert_eq!(first_section - scroll, Duration::ZERO);
    assert!(!logs.contents().contains("delay"));
}

// ---------------------------------------------------------------------------
// Concurrency
// ---------------------------------------------------------------------------

#[tokio::test]
async fn concurrent_scrapes_each_own_a_page() {
    let page = MockPage::new();
    let log = page.log();
    let session = MockSession::new(page);
    let cookies = cookies();
    let options = no_pacing();

    let (a, b) = tokio::join!(
        scrape_profile(&session, &cookies, URL, &options),
        scrape_profile(&session, &cookies, "https://www.linkedin.com/in/grace/", &options),
    );

    assert!(a.is_ok() && b.is_ok());
    assert_eq!(log.count(&Call::Close), 2);
    assert_eq!(log.count(&Call::Connections), 2);
}
