//! Default text normalization for an assembled [`Profile`].

use std::sync::LazyLock;

use regex::Regex;

use profile_common::{
    About, Accomplishment, AccomplishmentItem, Connections, ContactEntry, Education, Position,
    Profile, ProfileHeader, Recommendation, RelatedProfile, Skill, VolunteerExperience,
};

use crate::traits::ProfileCleaner;

// =============================================================================
// Regex Patterns
// =============================================================================

/// Expand/collapse control label trailing the text (or standing alone).
static RE_PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:…|\.\.\.)?\s*\b(?:see|show)\s+(?:more|less)\s*$").unwrap()
});
static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Collapses whitespace, strips "see more"-style placeholders, turns empty
/// text into `None` and drops list entries with no content left.
#[derive(Debug, Clone, Default)]
pub struct TextCleaner;

impl TextCleaner {
    pub fn new() -> Self {
        Self
    }
}

impl ProfileCleaner for TextCleaner {
    fn clean(&self, mut profile: Profile) -> Profile {
        profile.profile = profile.profile.map(cleaned);
        profile.about = profile.about.map(cleaned);

        if let Some(header) = profile.profile.as_mut() {
            if header.summary.is_none() {
                header.summary = profile.about.as_ref().and_then(|a| a.text.clone());
            }
        }

        clean_list(&mut profile.positions);
        clean_list(&mut profile.educations);
        clean_list(&mut profile.skills);
        clean_list(&mut profile.recommendations.given);
        clean_list(&mut profile.recommendations.received);
        profile.recommendations.given_count = clean_count(&profile.recommendations.given_count);
        profile.recommendations.received_count =
            clean_count(&profile.recommendations.received_count);
        clean_list(&mut profile.accomplishments);
        for panel in [
            &mut profile.courses,
            &mut profile.honors,
            &mut profile.languages,
            &mut profile.organizations,
            &mut profile.patents,
            &mut profile.projects,
            &mut profile.publications,
            &mut profile.test_scores,
        ] {
            clean_list(panel);
        }
        clean_list(&mut profile.people_also_viewed);
        clean_list(&mut profile.volunteer_experience);
        clean_list(&mut profile.contact);
        profile.connections.clean();

        profile
    }
}

/// Normalize one piece of extracted text. `None` when nothing is left.
pub fn clean_text(raw: &str) -> Option<String> {
    let stripped = RE_PLACEHOLDER.replace_all(raw, " ");
    let collapsed = RE_WHITESPACE.replace_all(&stripped, " ");
    let trimmed = collapsed.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn clean_count(raw: &str) -> String {
    clean_text(raw).unwrap_or_else(|| crate::assembler::ZERO_COUNT.to_string())
}

fn clean_field(field: &mut Option<String>) {
    *field = field.as_deref().and_then(clean_text);
}

fn clean_values(values: &mut Vec<String>) {
    *values = values.iter().filter_map(|v| clean_text(v)).collect();
}

fn cleaned<T: Clean>(mut record: T) -> T {
    record.clean();
    record
}

fn clean_list<T: Clean>(records: &mut Vec<T>) {
    for record in records.iter_mut() {
        record.clean();
    }
    records.retain(|r| !r.is_empty());
}

/// A sub-record the cleaner can normalize in place.
trait Clean {
    fn clean(&mut self);
    fn is_empty(&self) -> bool;
}

macro_rules! impl_clean {
    ($ty:ty { $($field:ident),+ $(,)? }) => {
        impl Clean for $ty {
            fn clean(&mut self) {
                $(clean_field(&mut self.$field);)+
            }

            fn is_empty(&self) -> bool {
                true $(&& self.$field.is_none())+
            }
        }
    };
}

impl_clean!(ProfileHeader { name, headline, location, connections, imageurl, summary });
impl_clean!(About { text });
impl_clean!(Position { title, company_name, location, description, date1, date2, url });
impl_clean!(Education { title, degree, field_of_study, date1, date2, url });
impl_clean!(Skill { title, count });
impl_clean!(Recommendation { user, text, profile_image, name, position });
impl_clean!(AccomplishmentItem { name, date, description });
impl_clean!(VolunteerExperience { title, experience, location, description, date1, date2 });
impl_clean!(RelatedProfile { user, text, profile_image, name, position });
impl_clean!(Connections { count, followers });

impl Clean for Accomplishment {
    fn clean(&mut self) {
        clean_field(&mut self.count);
        clean_field(&mut self.title);
        clean_values(&mut self.items);
    }

    fn is_empty(&self) -> bool {
        self.count.is_none() && self.title.is_none() && self.items.is_empty()
    }
}

impl Clean for ContactEntry {
    fn clean(&mut self) {
        clean_field(&mut self.kind);
        clean_values(&mut self.values);
    }

    fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_whitespace_and_trims() {
        assert_eq!(
            clean_text("  Senior\n\n   Engineer\t at  Acme ").as_deref(),
            Some("Senior Engineer at Acme")
        );
    }

    #[test]
    fn strips_see_more_placeholders() {
        assert_eq!(
            clean_text("Built the ledger…see more").as_deref(),
            Some("Built the ledger")
        );
        assert_eq!(
            clean_text("Led a team of five ... See more").as_deref(),
            Some("Led a team of five")
        );
        assert_eq!(clean_text("Show less"), None);
    }

    #[test]
    fn keeps_see_more_inside_prose() {
        assert_eq!(
            clean_text("We oversee more than 40 engineers").as_deref(),
            Some("We oversee more than 40 engineers")
        );
        assert_eq!(
            clean_text("Customers see more value when onboarding is fast").as_deref(),
            Some("Customers see more value when onboarding is fast")
        );
        assert_eq!(
            clean_text("Teams I oversee more").as_deref(),
            Some("Teams I oversee more")
        );
    }

    #[test]
    fn blank_text_becomes_none() {
        assert_eq!(clean_text("   \n "), None);
    }

    #[test]
    fn drops_fully_empty_list_entries() {
        let profile = Profile {
            positions: vec![
                Position {
                    title: Some("  ".into()),
                    ..Default::default()
                },
                Position {
                    title: Some(" CTO ".into()),
                    ..Default::default()
                },
            ],
            contact: vec![ContactEntry {
                kind: Some("Email".into()),
                values: vec!["  ".into()],
            }],
            ..Default::default()
        };

        let cleaned = TextCleaner::new().clean(profile);
        assert_eq!(cleaned.positions.len(), 1);
        assert_eq!(cleaned.positions[0].title.as_deref(), Some("CTO"));
        assert!(cleaned.contact.is_empty());
    }

    #[test]
    fn keeps_empty_single_value_sections() {
        let profile = Profile {
            profile: Some(ProfileHeader::default()),
            ..Default::default()
        };
        let cleaned = TextCleaner::new().clean(profile);
        assert_eq!(cleaned.profile, Some(ProfileHeader::default()));
        assert_eq!(cleaned.recommendations.given_count, "0");
    }

    #[test]
    fn about_text_fills_missing_summary() {
        let profile = Profile {
            profile: Some(ProfileHeader {
                name: Some("Ada".into()),
                ..Default::default()
            }),
            about: Some(About {
                text: Some("Analytical  engine\nenthusiast".into()),
            }),
            ..Default::default()
        };
        let cleaned = TextCleaner::new().clean(profile);
        assert_eq!(
            cleaned.profile.unwrap().summary.as_deref(),
            Some("Analytical engine enthusiast")
        );
    }
}
