use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Extraction inputs
// ---------------------------------------------------------------------------

/// One extracted record: field name to value, exactly as the extractor
/// produced it. Decoded into a typed record during assembly.
pub type RawRecord = serde_json::Map<String, serde_json::Value>;

/// A logical, independently extractable region of a profile page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Profile,
    About,
    Positions,
    Educations,
    RecommendationsCount,
    RecommendationsReceived,
    RecommendationsGiven,
    Skills,
    Accomplishments,
    VolunteerExperience,
    PeopleAlsoViewed,
}

impl Section {
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Profile => "profile",
            Section::About => "about",
            Section::Positions => "positions",
            Section::Educations => "educations",
            Section::RecommendationsCount => "recommendations_count",
            Section::RecommendationsReceived => "recommendations_received",
            Section::RecommendationsGiven => "recommendations_given",
            Section::Skills => "skills",
            Section::Accomplishments => "accomplishments",
            Section::VolunteerExperience => "volunteer_experience",
            Section::PeopleAlsoViewed => "people_also_viewed",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category-specific accomplishment panel, extracted with a uniform call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccomplishmentCategory {
    Courses,
    Honors,
    Languages,
    Organizations,
    Patents,
    Projects,
    Publications,
    TestScores,
}

impl AccomplishmentCategory {
    /// Extraction order used by the pipeline.
    pub const ALL: [AccomplishmentCategory; 8] = [
        AccomplishmentCategory::Courses,
        AccomplishmentCategory::Honors,
        AccomplishmentCategory::Languages,
        AccomplishmentCategory::Organizations,
        AccomplishmentCategory::Patents,
        AccomplishmentCategory::Projects,
        AccomplishmentCategory::Publications,
        AccomplishmentCategory::TestScores,
    ];

    /// Slug the profile page uses for this panel.
    pub fn slug(&self) -> &'static str {
        match self {
            AccomplishmentCategory::Courses => "courses",
            AccomplishmentCategory::Honors => "honors",
            AccomplishmentCategory::Languages => "languages",
            AccomplishmentCategory::Organizations => "organizations",
            AccomplishmentCategory::Patents => "patents",
            AccomplishmentCategory::Projects => "projects",
            AccomplishmentCategory::Publications => "publications",
            AccomplishmentCategory::TestScores => "test-scores",
        }
    }
}

impl fmt::Display for AccomplishmentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Session cookie injected into the page before navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub domain: Option<String>,
}

impl Cookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            domain: None,
        }
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }
}

/// HTTP credentials handed to the page-acquisition layer.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Normalized profile record
// ---------------------------------------------------------------------------

/// The normalized profile. Every field is always present: missing data is
/// an empty list, `None` for single-value sections, or `"0"` for
/// recommendation counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub profile: Option<ProfileHeader>,
    pub about: Option<About>,
    pub positions: Vec<Position>,
    pub educations: Vec<Education>,
    pub skills: Vec<Skill>,
    pub recommendations: Recommendations,
    pub accomplishments: Vec<Accomplishment>,
    pub courses: Vec<AccomplishmentItem>,
    pub honors: Vec<AccomplishmentItem>,
    pub languages: Vec<AccomplishmentItem>,
    pub organizations: Vec<AccomplishmentItem>,
    pub patents: Vec<AccomplishmentItem>,
    pub projects: Vec<AccomplishmentItem>,
    pub publications: Vec<AccomplishmentItem>,
    pub test_scores: Vec<AccomplishmentItem>,
    pub people_also_viewed: Vec<RelatedProfile>,
    pub volunteer_experience: Vec<VolunteerExperience>,
    pub contact: Vec<ContactEntry>,
    pub connections: Connections,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfileHeader {
    pub name: Option<String>,
    pub headline: Option<String>,
    pub location: Option<String>,
    pub connections: Option<String>,
    pub imageurl: Option<String>,
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct About {
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Position {
    pub title: Option<String>,
    pub company_name: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub date1: Option<String>,
    pub date2: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Education {
    pub title: Option<String>,
    pub degree: Option<String>,
    pub field_of_study: Option<String>,
    pub date1: Option<String>,
    pub date2: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Skill {
    pub title: Option<String>,
    pub count: Option<String>,
}

/// Aggregate recommendation counts as the page renders them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RecommendationsCount {
    pub received: Option<String>,
    pub given: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Recommendation {
    pub user: Option<String>,
    pub text: Option<String>,
    pub profile_image: Option<String>,
    pub name: Option<String>,
    pub position: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendations {
    pub given_count: String,
    pub received_count: String,
    pub given: Vec<Recommendation>,
    pub received: Vec<Recommendation>,
}

impl Default for Recommendations {
    fn default() -> Self {
        Self {
            given_count: "0".to_string(),
            received_count: "0".to_string(),
            given: Vec::new(),
            received: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Accomplishment {
    pub count: Option<String>,
    pub title: Option<String>,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AccomplishmentItem {
    pub name: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VolunteerExperience {
    pub title: Option<String>,
    pub experience: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub date1: Option<String>,
    pub date2: Option<String>,
}

/// Entry in the "people also viewed" sidebar.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RelatedProfile {
    pub user: Option<String>,
    pub text: Option<String>,
    pub profile_image: Option<String>,
    pub name: Option<String>,
    pub position: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactEntry {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Connections {
    pub count: Option<String>,
    pub followers: Option<String>,
}
