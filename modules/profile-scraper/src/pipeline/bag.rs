use profile_common::{AccomplishmentCategory, RawRecord, Section};

/// Raw per-section results collected during one scrape. Filled once per
/// field in extraction order, then handed whole to the assembler.
#[derive(Debug, Clone, Default)]
pub struct RawProfileBag {
    pub profile: Vec<RawRecord>,
    pub about: Vec<RawRecord>,
    pub positions: Vec<RawRecord>,
    pub educations: Vec<RawRecord>,
    pub recommendations_count: Vec<RawRecord>,
    /// As named by the extractor. The assembler swaps received and given.
    pub recommendations_received: Vec<RawRecord>,
    pub recommendations_given: Vec<RawRecord>,
    pub skills: Vec<RawRecord>,
    pub accomplishments: Vec<RawRecord>,
    pub courses: Vec<RawRecord>,
    pub honors: Vec<RawRecord>,
    pub languages: Vec<RawRecord>,
    pub organizations: Vec<RawRecord>,
    pub patents: Vec<RawRecord>,
    pub projects: Vec<RawRecord>,
    pub publications: Vec<RawRecord>,
    pub test_scores: Vec<RawRecord>,
    pub volunteer_experience: Vec<RawRecord>,
    pub people_also_viewed: Vec<RawRecord>,
    pub contact: Vec<RawRecord>,
    pub connections: RawRecord,
}

impl RawProfileBag {
    pub fn section_mut(&mut self, section: Section) -> &mut Vec<RawRecord> {
        match section {
            Section::Profile => &mut self.profile,
            Section::About => &mut self.about,
            Section::Positions => &mut self.positions,
            Section::Educations => &mut self.educations,
            Section::RecommendationsCount => &mut self.recommendations_count,
            Section::RecommendationsReceived => &mut self.recommendations_received,
            Section::RecommendationsGiven => &mut self.recommendations_given,
            Section::Skills => &mut self.skills,
            Section::Accomplishments => &mut self.accomplishments,
            Section::VolunteerExperience => &mut self.volunteer_experience,
            Section::PeopleAlsoViewed => &mut self.people_also_viewed,
        }
    }

    pub fn panel_mut(&mut self, category: AccomplishmentCategory) -> &mut Vec<RawRecord> {
        match category {
            AccomplishmentCategory::Courses => &mut self.courses,
            AccomplishmentCategory::Honors => &mut self.honors,
            AccomplishmentCategory::Languages => &mut self.languages,
            AccomplishmentCategory::Organizations => &mut self.organizations,
            AccomplishmentCategory::Patents => &mut self.patents,
            AccomplishmentCategory::Projects => &mut self.projects,
            AccomplishmentCategory::Publications => &mut self.publications,
            AccomplishmentCategory::TestScores => &mut self.test_scores,
        }
    }
}
