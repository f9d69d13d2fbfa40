//! Extracted profile records and the archival batch format.

use crate::identifier::ProfileIdentifier;
use serde::{Deserialize, Serialize};

/// One role held by a subject, in page order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    /// Job title, when the page exposed one.
    pub title: Option<String>,
    /// Employer or organization name.
    pub organization: Option<String>,
    /// Free-form duration string as shown on the page.
    pub duration: Option<String>,
}

impl ExperienceEntry {
    /// True when at least one component was captured.
    pub fn has_signal(&self) -> bool {
        self.title.is_some() || self.organization.is_some() || self.duration.is_some()
    }
}

/// One credential held by a subject, in page order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    /// Granting institution.
    pub institution: Option<String>,
    /// Degree or certificate description.
    pub credential: Option<String>,
}

impl EducationEntry {
    /// True when at least one component was captured.
    pub fn has_signal(&self) -> bool {
        self.institution.is_some() || self.credential.is_some()
    }
}

/// Outcome marker distinguishing how much of a profile was recovered.
///
/// Serialized into the archive so every identifier's fate stays recoverable
/// after the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ExtractionStatus {
    /// Every scalar field and at least one entry per list field was found.
    Complete,
    /// The page was reached but some fields were absent.
    Partial,
    /// The page could not be extracted at all.
    Failed {
        /// Human-readable cause recorded for the archive.
        cause: String,
    },
}

impl ExtractionStatus {
    /// True for the failed variant.
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Best-effort structured extraction result for one subject.
///
/// Absence of any optional field is a valid, expected state. A record with
/// every optional field absent is still usable downstream; it simply
/// contributes no signal to synthesis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    /// The identifier this record was extracted from.
    pub identifier: ProfileIdentifier,
    /// Subject's display name.
    pub display_name: Option<String>,
    /// Short headline shown under the name.
    pub headline: Option<String>,
    /// Geographic location string.
    pub location: Option<String>,
    /// "About" / summary text.
    pub summary: Option<String>,
    /// Roles in page order, most recent first by convention.
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    /// Credentials in page order.
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    /// Deduplicated skill labels; order carries no meaning.
    #[serde(default)]
    pub skills: Vec<String>,
    /// Recent activity snippets, most recent first.
    #[serde(default)]
    pub activity: Vec<String>,
    /// How the extraction ended for this subject.
    pub status: ExtractionStatus,
}

impl ProfileRecord {
    /// Creates an empty record for the given identifier, marked partial
    /// until [`finalize_status`](Self::finalize_status) runs.
    pub fn new(identifier: ProfileIdentifier) -> Self {
        Self {
            identifier,
            display_name: None,
            headline: None,
            location: None,
            summary: None,
            experience: Vec::new(),
            education: Vec::new(),
            skills: Vec::new(),
            activity: Vec::new(),
            status: ExtractionStatus::Partial,
        }
    }

    /// Creates a record carrying only the identifier and a failure cause.
    pub fn failed(identifier: ProfileIdentifier, cause: impl Into<String>) -> Self {
        let mut record = Self::new(identifier);
        record.status = ExtractionStatus::Failed {
            cause: cause.into(),
        };
        record
    }

    /// Adds a skill unless an equal label (case-insensitive) is present.
    pub fn push_skill(&mut self, skill: impl Into<String>) {
        let skill = skill.into();
        let duplicate = self
            .skills
            .iter()
            .any(|existing| existing.eq_ignore_ascii_case(&skill));
        if !duplicate {
            self.skills.push(skill);
        }
    }

    /// True when any optional field carries data.
    pub fn has_signal(&self) -> bool {
        self.display_name.is_some()
            || self.headline.is_some()
            || self.location.is_some()
            || self.summary.is_some()
            || !self.experience.is_empty()
            || !self.education.is_empty()
            || !self.skills.is_empty()
            || !self.activity.is_empty()
    }

    /// Settles the status to complete or partial based on captured fields.
    ///
    /// Failed records keep their failure cause untouched.
    pub fn finalize_status(&mut self) {
        if self.status.is_failed() {
            return;
        }
        let complete = self.display_name.is_some()
            && self.headline.is_some()
            && self.location.is_some()
            && self.summary.is_some()
            && !self.experience.is_empty()
            && !self.education.is_empty()
            && !self.skills.is_empty()
            && !self.activity.is_empty();
        self.status = if complete {
            ExtractionStatus::Complete
        } else {
            ExtractionStatus::Partial
        };
    }
}

/// Serializes a record batch to the pretty-printed archive JSON document.
///
/// The archive holds exactly one entry per attempted identifier, in input
/// order, including failed subjects.
pub fn archive_to_json(records: &[ProfileRecord]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(records)
}

/// Reads a record batch back from archive JSON.
pub fn archive_from_json(json: &str) -> serde_json::Result<Vec<ProfileRecord>> {
    serde_json::from_str(json)
}
