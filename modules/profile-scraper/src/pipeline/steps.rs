//! Per-step failure policy.
//!
//! Every pipeline step is classified up front as tolerated or fatal. A
//! failing tolerated step becomes a [`StepFailure::Soft`] that the
//! coordinator logs and skips; a failing fatal step becomes a
//! [`StepFailure::Hard`] carrying the collaborator's error unchanged.

use std::fmt;
use std::future::Future;

use profile_common::{AccomplishmentCategory, Section};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepPolicy {
    Tolerated,
    Fatal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Wait for the "profile loaded" structural marker.
    Readiness,
    Scroll,
    Expand,
    Section(Section),
    Panel(AccomplishmentCategory),
    Contact,
    Connections,
}

impl Step {
    pub fn policy(&self) -> StepPolicy {
        match self {
            // A missing marker usually means cosmetic markup drift while the
            // rest of the page is still scrapeable.
            Step::Readiness => StepPolicy::Tolerated,
            _ => StepPolicy::Fatal,
        }
    }

    pub fn fail(self, error: anyhow::Error) -> StepFailure {
        match self.policy() {
            StepPolicy::Tolerated => StepFailure::Soft { step: self, error },
            StepPolicy::Fatal => StepFailure::Hard { step: self, error },
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Readiness => f.write_str("readiness"),
            Step::Scroll => f.write_str("scroll"),
            Step::Expand => f.write_str("expand"),
            Step::Section(section) => write!(f, "section:{section}"),
            Step::Panel(category) => write!(f, "panel:{category}"),
            Step::Contact => f.write_str("contact"),
            Step::Connections => f.write_str("connections"),
        }
    }
}

#[derive(Debug)]
pub enum StepFailure {
    Soft { step: Step, error: anyhow::Error },
    Hard { step: Step, error: anyhow::Error },
}

impl StepFailure {
    pub fn step(&self) -> Step {
        match self {
            StepFailure::Soft { step, .. } | StepFailure::Hard { step, .. } => *step,
        }
    }

    pub fn is_soft(&self) -> bool {
        matches!(self, StepFailure::Soft { .. })
    }

    pub fn into_error(self) -> anyhow::Error {
        match self {
            StepFailure::Soft { error, .. } | StepFailure::Hard { error, .. } => error,
        }
    }
}

/// Await one step, classifying any error by the step's policy.
pub async fn run_step<T, F>(step: Step, fut: F) -> Result<T, StepFailure>
where
    F: Future<Output = anyhow::Result<T>>,
{
    fut.await.map_err(|e| step.fail(e))
}
