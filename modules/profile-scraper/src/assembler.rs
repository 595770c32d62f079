//! Raw bag → normalized [`Profile`].
//!
//! Every default lives here: single-value sections unwrap to `None` when
//! empty, missing recommendation counts become `"0"`, contact info becomes an
//! empty list. Records decode leniently, so assembly never fails.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use profile_common::{Profile, RawRecord, Recommendation, Recommendations, RecommendationsCount};

use crate::pipeline::RawProfileBag;

/// Count reported when the page shows no recommendation totals.
pub const ZERO_COUNT: &str = "0";

pub fn assemble(bag: RawProfileBag) -> Profile {
    Profile {
        profile: first(bag.profile),
        about: first(bag.about),
        positions: decode_all(bag.positions),
        educations: decode_all(bag.educations),
        skills: decode_all(bag.skills),
        recommendations: recommendations(
            first(bag.recommendations_count),
            bag.recommendations_received,
            bag.recommendations_given,
        ),
        accomplishments: decode_all(bag.accomplishments),
        courses: decode_all(bag.courses),
        honors: decode_all(bag.honors),
        languages: decode_all(bag.languages),
        organizations: decode_all(bag.organizations),
        patents: decode_all(bag.patents),
        projects: decode_all(bag.projects),
        publications: decode_all(bag.publications),
        test_scores: decode_all(bag.test_scores),
        people_also_viewed: decode_all(bag.people_also_viewed),
        volunteer_experience: decode_all(bag.volunteer_experience),
        contact: decode_all(bag.contact),
        connections: decode(bag.connections),
    }
}

/// Build the recommendations block.
///
/// The extractor's "received" list lands in `given` and its "given" list
/// lands in `received`. Counts are taken as-is, `"0"` when absent.
pub fn recommendations(
    count: Option<RecommendationsCount>,
    raw_received: Vec<RawRecord>,
    raw_given: Vec<RawRecord>,
) -> Recommendations {
    let count = count.unwrap_or_default();
    Recommendations {
        given_count: count.given.unwrap_or_else(|| ZERO_COUNT.to_string()),
        received_count: count.received.unwrap_or_else(|| ZERO_COUNT.to_string()),
        given: decode_all::<Recommendation>(raw_received),
        received: decode_all::<Recommendation>(raw_given),
    }
}

/// Unwrap a one-element section. Extra records are ignored.
pub fn first<T: DeserializeOwned + Default>(records: Vec<RawRecord>) -> Option<T> {
    records.into_iter().next().map(decode)
}

pub fn decode_all<T: DeserializeOwned + Default>(records: Vec<RawRecord>) -> Vec<T> {
    records.into_iter().map(decode).collect()
}

/// Decode one record. Nulls count as missing, numbers and booleans become
/// strings, and a record that still doesn't fit decodes to the empty record.
pub fn decode<T: DeserializeOwned + Default>(record: RawRecord) -> T {
    let normalized: RawRecord = record
        .into_iter()
        .filter(|(_, v)| !v.is_null())
        .map(|(k, v)| (k, stringify_scalars(v)))
        .collect();

    match serde_json::from_value(Value::Object(normalized)) {
        Ok(value) => value,
        Err(e) => {
            warn!(
                error = %e,
                record_type = std::any::type_name::<T>(),
                "Malformed record, using empty record"
            );
            T::default()
        }
    }
}

fn stringify_scalars(value: Value) -> Value {
    match value {
        Value::Number(n) => Value::String(n.to_string()),
        Value::Bool(b) => Value::String(b.to_string()),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .filter(|v| !v.is_null())
                .map(stringify_scalars)
                .collect(),
        ),
        other => other,
    }
}
