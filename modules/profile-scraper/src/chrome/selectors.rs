// Where each section lives in the profile page markup.
//
// Selectors track the site's markup and drift with it; when a section
// starts coming back empty, this table is the place to look first.

use serde::Serialize;

use profile_common::{AccomplishmentCategory, Section};

/// How a field's value is read from its element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum Read {
    /// `innerText` of the first match.
    Text,
    /// An attribute of the first match.
    Attr(&'static str),
    /// `innerText` of every match, as a list.
    AllText,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Field {
    pub name: &'static str,
    /// Relative to the record root. Empty means the root itself.
    pub selector: &'static str,
    pub read: Read,
}

/// One record per element matching `root`.
#[derive(Debug, Clone, Serialize)]
pub struct Selectors {
    pub root: String,
    pub fields: &'static [Field],
}

const fn text(name: &'static str, selector: &'static str) -> Field {
    Field {
        name,
        selector,
        read: Read::Text,
    }
}

const fn attr(name: &'static str, selector: &'static str, attribute: &'static str) -> Field {
    Field {
        name,
        selector,
        read: Read::Attr(attribute),
    }
}

const fn all_text(name: &'static str, selector: &'static str) -> Field {
    Field {
        name,
        selector,
        read: Read::AllText,
    }
}

const PROFILE_FIELDS: &[Field] = &[
    text("name", ".text-heading-xlarge, .pv-top-card--list > li:first-child"),
    text("headline", ".text-body-medium, h2"),
    text("location", ".pv-top-card--list-bullet > li:first-child, .text-body-small.inline"),
    text("connections", ".pv-top-card--list-bullet > li:nth-child(2)"),
    attr("imageurl", "img.pv-top-card-profile-picture__image, img.pv-top-card__photo", "src"),
];

const ABOUT_FIELDS: &[Field] = &[text("text", ".pv-about__summary-text, .inline-show-more-text")];

const POSITION_FIELDS: &[Field] = &[
    text("title", "h3"),
    text("companyName", ".pv-entity__secondary-title"),
    text("location", ".pv-entity__location span:last-child"),
    text("description", ".pv-entity__description"),
    text("date1", ".pv-entity__date-range span:last-child"),
    text("date2", ".pv-entity__bullet-item-v2"),
    attr("url", "a", "href"),
];

const EDUCATION_FIELDS: &[Field] = &[
    text("title", "h3"),
    text("degree", ".pv-entity__degree-name .pv-entity__comma-item"),
    text("fieldOfStudy", ".pv-entity__fos .pv-entity__comma-item"),
    text("date1", ".pv-entity__dates time:first-child"),
    text("date2", ".pv-entity__dates time:nth-child(2)"),
    attr("url", "a", "href"),
];

const RECOMMENDATIONS_COUNT_FIELDS: &[Field] = &[
    text("received", "artdeco-tab:nth-child(1)"),
    text("given", "artdeco-tab:nth-child(2)"),
];

const RECOMMENDATION_FIELDS: &[Field] = &[
    attr("user", "a", "href"),
    text("text", ".pv-recommendation-entity__text"),
    attr("profileImage", "a img", "src"),
    text("name", ".pv-recommendation-entity__detail h3"),
    text("position", ".pv-recommendation-entity__detail p:nth-of-type(1)"),
];

const SKILL_FIELDS: &[Field] = &[
    text("title", ".pv-skill-category-entity__name-text"),
    text("count", ".pv-skill-category-entity__endorsement-count"),
];

const ACCOMPLISHMENT_FIELDS: &[Field] = &[
    text("count", "h3 span:last-child"),
    text("title", ".pv-accomplishments-block__title"),
    all_text("items", "li"),
];

const VOLUNTEER_FIELDS: &[Field] = &[
    text("title", "h3"),
    text("experience", ".pv-entity__secondary-title"),
    text("location", ".pv-entity__location span:last-child"),
    text("description", ".pv-volunteer-causes, .pv-entity__description"),
    text("date1", ".pv-entity__date-range span:last-child"),
    text("date2", ".pv-entity__bullet-item"),
];

const RELATED_PROFILE_FIELDS: &[Field] = &[
    attr("user", "a", "href"),
    text("text", "p"),
    attr("profileImage", "a img", "src"),
    text("name", ".name, .actor-name"),
    text("position", ".browsemap-headline"),
];

const PANEL_ITEM_FIELDS: &[Field] = &[
    text("name", ".pv-accomplishment-entity__title"),
    text("date", ".pv-accomplishment-entity__date"),
    text("description", ".pv-accomplishment-entity__description"),
];

const CONTACT_FIELDS: &[Field] = &[
    text("type", "header"),
    all_text("values", "a, .pv-contact-info__ci-container span, li"),
];

const CONNECTION_FIELDS: &[Field] = &[
    text("count", ".pv-top-card--list-bullet > li:nth-child(2) span, a[href*=\"connections\"] span"),
    text("followers", ".pv-recent-activity-section__follower-count, a[href*=\"followers\"] span"),
];

/// Contact-info overlay.
pub const CONTACT_LINK: &str = "a[data-control-name=\"contact_see_more\"], #top-card-text-details-contact-info";
pub const CONTACT_MODAL: &str = ".pv-contact-info__contact-type";
pub const CONTACT_DISMISS: &str = "button[aria-label=\"Dismiss\"]";

/// Controls that reveal collapsed content.
pub const EXPAND_BUTTONS: &[&str] = &[
    ".pv-profile-section__see-more-inline",
    ".pv-profile-section__card-action-bar",
    ".inline-show-more-text__button",
    ".lt-line-clamp__more",
    ".pv-skills-section__additional-skills",
    "button.pv-profile-section__toggle-detail-icon",
];

pub fn section(section: Section) -> Selectors {
    let (root, fields) = match section {
        Section::Profile => (".pv-top-card, .ph5.pb5", PROFILE_FIELDS),
        Section::About => (".pv-about-section, #about ~ .display-flex", ABOUT_FIELDS),
        Section::Positions => (
            "#experience-section li:not(.pv-entity__position-group-role-item)",
            POSITION_FIELDS,
        ),
        Section::Educations => ("#education-section li", EDUCATION_FIELDS),
        Section::RecommendationsCount => (".recommendations-inlining", RECOMMENDATIONS_COUNT_FIELDS),
        Section::RecommendationsReceived => (
            "artdeco-tabpanel.active li.pv-recommendation-entity",
            RECOMMENDATION_FIELDS,
        ),
        Section::RecommendationsGiven => (
            "artdeco-tabpanel:not(.active) li.pv-recommendation-entity",
            RECOMMENDATION_FIELDS,
        ),
        Section::Skills => (".pv-skill-category-entity__skill-wrapper", SKILL_FIELDS),
        Section::Accomplishments => (".pv-accomplishments-section > div", ACCOMPLISHMENT_FIELDS),
        Section::VolunteerExperience => (
            "section.volunteering-section li",
            VOLUNTEER_FIELDS,
        ),
        Section::PeopleAlsoViewed => (
            "li.pv-browsemap-section__member-container",
            RELATED_PROFILE_FIELDS,
        ),
    };
    Selectors {
        root: root.to_string(),
        fields,
    }
}

pub fn panel(category: AccomplishmentCategory) -> Selectors {
    Selectors {
        root: format!(".pv-accomplishments-block.{} li", category.slug()),
        fields: PANEL_ITEM_FIELDS,
    }
}

/// Toggle that expands an accomplishment panel's item list.
pub fn panel_toggle(category: AccomplishmentCategory) -> String {
    format!(
        ".pv-accomplishments-block.{} button[aria-expanded=\"false\"]",
        category.slug()
    )
}

pub fn contact() -> Selectors {
    Selectors {
        root: CONTACT_MODAL.to_string(),
        fields: CONTACT_FIELDS,
    }
}

pub fn connections() -> Selectors {
    Selectors {
        root: "main".to_string(),
        fields: CONNECTION_FIELDS,
    }
}
