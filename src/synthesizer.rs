//! Composite-persona synthesis over a batch of profile records.
//!
//! The synthesizer serializes every record into one labeled prompt, calls
//! the generation backend exactly once, and checks the returned text for
//! structural conformance against the fixed twelve-section schema. Content
//! is advisory and human-reviewed; only the presence and order of section
//! headers is verified here.

use crate::providers::{GenerationProvider, GenerationRequest};
use crate::record::{ExtractionStatus, ProfileRecord};
use std::fmt;
use std::fmt::Write as _;

/// Per-section entry of the fixed persona schema.
#[derive(Debug, Clone, Copy)]
pub struct PersonaSection {
    /// Header title as it must appear in the generated document.
    pub title: &'static str,
    /// Intent bullets placed under the header in the prompt scaffold.
    pub guidance: &'static str,
}

/// The twelve persona sections, in contract order.
pub const PERSONA_SECTIONS: [PersonaSection; 12] = [
    PersonaSection {
        title: "PERSONA OVERVIEW",
        guidance: "- **Name**: the persona name given below\n\
                   - **Archetype**: a descriptive 2-3 word label (e.g., \"Strategic Executive\", \"Technical Leader\")\n\
                   - **One-line Summary**: concise description of who this persona represents",
    },
    PersonaSection {
        title: "DEMOGRAPHICS & PROFESSIONAL PROFILE",
        guidance: "- **Typical Roles/Titles**: list 3-5 common job titles\n\
                   - **Industries**: primary industries they work in\n\
                   - **Company Sizes**: startup, SMB, enterprise, etc.\n\
                   - **Career Stage**: early career, mid-level, senior, executive\n\
                   - **Geographic Distribution**: regions or countries\n\
                   - **Education Background**: common degrees, institutions, or certifications",
    },
    PersonaSection {
        title: "GOALS & MOTIVATIONS",
        guidance: "- **Professional Goals**: what they're trying to achieve (3-5 bullets)\n\
                   - **Personal Drivers**: what motivates them beyond work\n\
                   - **Success Metrics**: how they measure success",
    },
    PersonaSection {
        title: "PAIN POINTS & CHALLENGES",
        guidance: "- **Primary Challenges**: top 5 problems they face\n\
                   - **Frustrations**: what causes them stress or friction\n\
                   - **Resource Constraints**: time, budget, knowledge gaps",
    },
    PersonaSection {
        title: "BEHAVIORS & HABITS",
        guidance: "- **Daily Routines**: how they structure their workday\n\
                   - **Decision-Making Style**: analytical, intuitive, collaborative, etc.\n\
                   - **Information Consumption**: when and how they consume content\n\
                   - **Technology Adoption**: early adopter, pragmatist, conservative\n\
                   - **Social Media Activity**: platforms used, posting frequency, engagement style",
    },
    PersonaSection {
        title: "COMMUNICATION PREFERENCES",
        guidance: "- **Preferred Tone**: formal, conversational, technical, storytelling\n\
                   - **Content Formats**: articles, videos, podcasts, infographics, case studies\n\
                   - **Detail Level**: high-level overview, deep technical detail, balanced\n\
                   - **Reading Time**: short-form (2-3 min), medium (5-7 min), long-form (10+ min)\n\
                   - **Trigger Words**: language that resonates positively\n\
                   - **Turn-offs**: language or approaches to avoid",
    },
    PersonaSection {
        title: "CONTENT ENGAGEMENT PATTERNS",
        guidance: "- **Topics of Interest**: top 10 subjects they care about\n\
                   - **Content Discovery**: how they find new content (feeds, newsletters, search, recommendations)\n\
                   - **Engagement Triggers**: what makes them like, comment, or share\n\
                   - **Sharing Behavior**: when and why they share content with their network\n\
                   - **Time Investment**: how much time they'll spend on content per session",
    },
    PersonaSection {
        title: "PROFESSIONAL CONTEXT",
        guidance: "- **Reporting Structure**: who they report to, who reports to them\n\
                   - **Buying Authority**: decision maker, influencer, end user\n\
                   - **Key Relationships**: departments or roles they work closely with\n\
                   - **Meeting Schedule**: percentage of day in meetings vs focused work\n\
                   - **Travel Frequency**: how often they travel for work",
    },
    PersonaSection {
        title: "SKILLS & EXPERTISE",
        guidance: "- **Core Competencies**: top skills they possess\n\
                   - **Knowledge Areas**: domains where they're experts\n\
                   - **Learning Priorities**: skills they're actively developing\n\
                   - **Thought Leadership**: topics where they have strong opinions\n\
                   - When the input profiles carry little or no skill data, say so explicitly instead of inventing specifics",
    },
    PersonaSection {
        title: "CONTENT TESTING FRAMEWORK",
        guidance: "- **Relevance Score**: rate content 1-10 on: does this solve their problem?\n\
                   - **Engagement Score**: rate content 1-10 on: would they read, like, comment, or share?\n\
                   - **Action Score**: rate content 1-10 on: would they take action (click, download, contact)?\n\
                   - **Red Flags**: content elements that would immediately turn them off\n\
                   - **Green Flags**: content elements that would immediately hook them",
    },
    PersonaSection {
        title: "EXAMPLE CONTENT THAT RESONATES",
        guidance: "- Provide 3-5 hypothetical headlines or content topics that would strongly appeal to this persona\n\
                   - Explain WHY each would resonate",
    },
    PersonaSection {
        title: "ANTI-PATTERNS",
        guidance: "- List 5 things to NEVER do when creating content for this persona\n\
                   - Explain the reasoning",
    },
];

/// Caps applied when serializing records into the prompt.
const PROMPT_SUMMARY_CHARS: usize = 500;
const PROMPT_ACTIVITY_CHARS: usize = 200;
const PROMPT_MAX_EXPERIENCE: usize = 3;
const PROMPT_MAX_EDUCATION: usize = 2;
const PROMPT_MAX_SKILLS: usize = 10;
const PROMPT_MAX_ACTIVITY: usize = 2;

/// A validated synthesis request: at least one record plus a persona name.
#[derive(Debug, Clone)]
pub struct PersonaRequest {
    records: Vec<ProfileRecord>,
    persona_name: String,
}

impl PersonaRequest {
    /// Validates the batch and builds a request.
    ///
    /// A batch with zero usable records is rejected here, before any
    /// generation call. Failed records still count as usable input: the
    /// prompt labels them so the backend can tell deliberate absence from
    /// extractor failure, but a batch of only-failed records with no signal
    /// anywhere is rejected.
    pub fn new(
        records: Vec<ProfileRecord>,
        persona_name: impl Into<String>,
    ) -> Result<Self, SynthesisError> {
        if records.is_empty() {
            return Err(SynthesisError::EmptyBatch);
        }
        let any_usable = records
            .iter()
            .any(|record| !record.status.is_failed() || record.has_signal());
        if !any_usable {
            return Err(SynthesisError::EmptyBatch);
        }
        Ok(Self {
            records,
            persona_name: persona_name.into(),
        })
    }

    /// The records backing this request, in input order.
    pub fn records(&self) -> &[ProfileRecord] {
        &self.records
    }

    /// The target persona name.
    pub fn persona_name(&self) -> &str {
        &self.persona_name
    }

    /// Renders the single generation prompt for this request.
    pub fn build_prompt(&self) -> String {
        let mut prompt = String::new();
        let _ = write!(
            prompt,
            "You are an expert persona designer and audience analyst. Your task is to create a \
             comprehensive, actionable persona based on public professional profiles of {} \
             individuals.\n\n# INPUT DATA\n\n",
            self.records.len()
        );
        prompt.push_str(&summarize_records(&self.records));
        let _ = write!(
            prompt,
            "\n# YOUR TASK\n\nCreate a detailed composite persona named \"{name}\" that \
             represents the common patterns, behaviors, and characteristics across these \
             individuals. This persona will be used to test content relevance and engagement \
             potential.\n\n# REQUIRED PERSONA STRUCTURE\n\nGenerate a well-formatted markdown \
             document with exactly the following sections, numbered and titled as shown:\n\n",
            name = self.persona_name
        );
        for (index, section) in PERSONA_SECTIONS.iter().enumerate() {
            let _ = write!(
                prompt,
                "## {}. {}\n{}\n\n",
                index + 1,
                section.title,
                section.guidance
            );
        }
        prompt.push_str(
            "# SYNTHESIS GUIDELINES\n\n\
             1. **Find Common Patterns**: look for shared characteristics across profiles\n\
             2. **Be Specific**: use concrete details, not generic descriptions\n\
             3. **Stay Realistic**: base insights on actual profile data, not assumptions; \
             where data is sparse or marked unavailable, acknowledge the gap rather than \
             fabricating specifics\n\
             4. **Include Nuance**: note variations where they exist (\"Some prefer X, while others Y\")\n\
             5. **Make It Actionable**: every section should help content creators make better decisions\n\n\
             # OUTPUT FORMAT\n\n\
             - Keep every section header exactly as specified above, in the same order\n\
             - Use bullet points for lists and **bold** for emphasis\n\n\
             Generate the complete persona document now.",
        );
        prompt
    }
}

/// Serializes the batch in a labeled layout that distinguishes "subject has
/// no data for this field" from "subject failed extraction entirely".
fn summarize_records(records: &[ProfileRecord]) -> String {
    let mut parts = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let mut out = String::new();
        let display = record.display_name.as_deref().unwrap_or("Name unavailable");
        let _ = writeln!(out, "## Subject {}: {}\n", index + 1, display);
        if let ExtractionStatus::Failed { cause } = &record.status {
            let _ = writeln!(
                out,
                "Extraction failed for this subject ({cause}); any fields below were not \
                 recovered from the page.\n"
            );
        }
        let _ = writeln!(
            out,
            "**Headline**: {}",
            record.headline.as_deref().unwrap_or("No headline data")
        );
        let _ = writeln!(
            out,
            "**Location**: {}",
            record.location.as_deref().unwrap_or("No location data")
        );
        match &record.summary {
            Some(summary) => {
                let _ = writeln!(out, "**About**: {}", clip_chars(summary, PROMPT_SUMMARY_CHARS));
            }
            None => {
                let _ = writeln!(out, "**About**: No about section");
            }
        }

        if record.experience.is_empty() {
            let _ = writeln!(out, "\n**Recent Experience**: No experience data");
        } else {
            let _ = writeln!(out, "\n**Recent Experience**:");
            for entry in record.experience.iter().take(PROMPT_MAX_EXPERIENCE) {
                let _ = writeln!(
                    out,
                    "- {} at {} ({})",
                    entry.title.as_deref().unwrap_or("Unknown role"),
                    entry.organization.as_deref().unwrap_or("unknown organization"),
                    entry.duration.as_deref().unwrap_or("unknown duration"),
                );
            }
        }

        if record.education.is_empty() {
            let _ = writeln!(out, "\n**Education**: No education data");
        } else {
            let _ = writeln!(out, "\n**Education**:");
            for entry in record.education.iter().take(PROMPT_MAX_EDUCATION) {
                let _ = writeln!(
                    out,
                    "- {} from {}",
                    entry.credential.as_deref().unwrap_or("Unknown credential"),
                    entry.institution.as_deref().unwrap_or("unknown institution"),
                );
            }
        }

        if record.skills.is_empty() {
            let _ = writeln!(out, "\n**Skills**: No skills data");
        } else {
            let skills: Vec<_> = record
                .skills
                .iter()
                .take(PROMPT_MAX_SKILLS)
                .map(String::as_str)
                .collect();
            let _ = writeln!(out, "\n**Skills**: {}", skills.join(", "));
        }

        if record.activity.is_empty() {
            let _ = writeln!(out, "\n**Recent Activity**: No recent activity data");
        } else {
            let _ = writeln!(out, "\n**Recent Activity/Interests**:");
            for snippet in record.activity.iter().take(PROMPT_MAX_ACTIVITY) {
                let _ = writeln!(out, "- {}", clip_chars(snippet, PROMPT_ACTIVITY_CHARS));
            }
        }

        parts.push(out);
    }
    parts.join("\n---\n\n")
}

fn clip_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{cut}...")
}

/// Structural conformance report for a generated document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureReport {
    /// Section titles whose headers were not found in the text.
    pub missing: Vec<&'static str>,
    /// False when found headers appear out of contract order.
    pub in_order: bool,
}

impl StructureReport {
    /// True when all twelve headers are present in order.
    pub fn is_conforming(&self) -> bool {
        self.missing.is_empty() && self.in_order
    }
}

/// Scans generated text for the twelve numbered section headers.
///
/// The match is case-insensitive on the `N. TITLE` header line and ignores
/// markdown decoration, so `## 3. Goals & Motivations` and
/// `3. GOALS & MOTIVATIONS` both count.
pub fn check_structure(text: &str) -> StructureReport {
    let haystack = text.to_ascii_uppercase();
    let mut missing = Vec::new();
    let mut positions = Vec::new();
    for (index, section) in PERSONA_SECTIONS.iter().enumerate() {
        let needle = format!("{}. {}", index + 1, section.title);
        match haystack.find(&needle) {
            Some(pos) => positions.push(pos),
            None => missing.push(section.title),
        }
    }
    let in_order = positions.windows(2).all(|pair| pair[0] < pair[1]);
    StructureReport { missing, in_order }
}

/// The final artifact of a run: the persona text plus its conformance state.
#[derive(Debug, Clone)]
pub struct PersonaDocument {
    /// Persona name the document was generated for.
    pub persona_name: String,
    /// Model token the backend was configured with.
    pub model: String,
    /// Raw generated markdown, section-delimited.
    pub body: String,
    /// Header presence/order report; a degraded document is still usable.
    pub structure: StructureReport,
}

impl PersonaDocument {
    /// True when the document carries all twelve headers in order.
    pub fn is_conforming(&self) -> bool {
        self.structure.is_conforming()
    }
}

/// Result of one synthesis call: the document plus the originating records
/// handed back unconditionally for archival.
#[derive(Debug)]
pub struct SynthesisOutcome {
    /// The generated persona document.
    pub document: PersonaDocument,
    /// The full input batch, order preserved.
    pub records: Vec<ProfileRecord>,
}

/// Errors surfaced by the synthesizer.
#[derive(Debug)]
pub enum SynthesisError {
    /// The batch contained zero usable records.
    EmptyBatch,
    /// The generation backend failed or was unreachable.
    Generation(anyhow::Error),
    /// The backend returned an empty body.
    EmptyResponse,
}

impl fmt::Display for SynthesisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyBatch => write!(f, "no usable profile records to synthesize from"),
            Self::Generation(err) => write!(f, "generation backend failed: {err:#}"),
            Self::EmptyResponse => write!(f, "generation backend returned an empty document"),
        }
    }
}

impl std::error::Error for SynthesisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Generation(err) => Some(err.as_ref()),
            Self::EmptyBatch | Self::EmptyResponse => None,
        }
    }
}

/// Turns record batches into persona documents via one generation call each.
pub struct Synthesizer {
    provider: Box<dyn GenerationProvider>,
    temperature: f32,
    max_tokens: usize,
}

impl Synthesizer {
    /// Builds a synthesizer over the given generation backend.
    pub fn new(provider: Box<dyn GenerationProvider>) -> Self {
        Self {
            provider,
            temperature: 0.7,
            max_tokens: 4096,
        }
    }

    /// Overrides the sampling parameters sent to the backend.
    pub fn with_sampling(mut self, temperature: f32, max_tokens: usize) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self
    }

    /// Runs one synthesis over the request's whole batch.
    ///
    /// Exactly one backend call is made; there are no retries here. A
    /// document with missing or reordered headers is returned degraded
    /// rather than rejected.
    #[tracing::instrument(skip(self, request), fields(subjects = request.records().len()))]
    pub fn synthesize(&self, request: PersonaRequest) -> Result<SynthesisOutcome, SynthesisError> {
        let prompt = request.build_prompt();
        let body = self
            .provider
            .generate(&GenerationRequest {
                prompt: &prompt,
                temperature: self.temperature,
                max_tokens: self.max_tokens,
            })
            .map_err(SynthesisError::Generation)?;
        if body.trim().is_empty() {
            return Err(SynthesisError::EmptyResponse);
        }

        let structure = check_structure(&body);
        if !structure.is_conforming() {
            tracing::warn!(
                missing = structure.missing.len(),
                in_order = structure.in_order,
                "generated document failed structural conformance; returning degraded"
            );
        }

        let PersonaRequest {
            records,
            persona_name,
        } = request;
        Ok(SynthesisOutcome {
            document: PersonaDocument {
                persona_name,
                model: self.provider.model().to_string(),
                body,
                structure,
            },
            records,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifier::ProfileIdentifier;
    use anyhow::bail;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn record(slug: &str, name: Option<&str>) -> ProfileRecord {
        let mut record = ProfileRecord::new(
            ProfileIdentifier::parse(&format!("https://linkedin.com/in/{slug}")).expect("valid"),
        );
        record.display_name = name.map(str::to_string);
        record.finalize_status();
        record
    }

    /// Backend double that counts calls and replies with canned text.
    struct CannedProvider {
        body: String,
        calls: Arc<AtomicUsize>,
    }

    impl CannedProvider {
        fn conforming() -> (Self, Arc<AtomicUsize>) {
            let mut body = String::from("Intro text.\n");
            for (index, section) in PERSONA_SECTIONS.iter().enumerate() {
                body.push_str(&format!(
                    "## {}. {}\nGenerated content.\n",
                    index + 1,
                    section.title
                ));
            }
            let calls = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    body,
                    calls: Arc::clone(&calls),
                },
                calls,
            )
        }

        fn with_body(body: &str) -> Self {
            Self {
                body: body.to_string(),
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    impl GenerationProvider for CannedProvider {
        fn generate(&self, _request: &GenerationRequest) -> anyhow::Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.body.clone())
        }

        fn model(&self) -> &str {
            "test-model"
        }
    }

    struct FailingProvider;

    impl GenerationProvider for FailingProvider {
        fn generate(&self, _request: &GenerationRequest) -> anyhow::Result<String> {
            bail!("backend unreachable")
        }

        fn model(&self) -> &str {
            "test-model"
        }
    }

    #[test]
    fn empty_batch_rejected_before_any_generation_call() {
        let err = PersonaRequest::new(Vec::new(), "Anyone").expect_err("empty rejected");
        assert!(matches!(err, SynthesisError::EmptyBatch));
    }

    #[test]
    fn single_record_batch_is_accepted() {
        let request =
            PersonaRequest::new(vec![record("solo", Some("Solo"))], "Solo Persona").expect("ok");
        assert_eq!(request.records().len(), 1);
    }

    #[test]
    fn batch_of_signalless_failures_is_rejected() {
        let failed = ProfileRecord::failed(
            ProfileIdentifier::parse("https://linkedin.com/in/gone").expect("valid"),
            "page unreachable",
        );
        let err = PersonaRequest::new(vec![failed], "Ghost").expect_err("rejected");
        assert!(matches!(err, SynthesisError::EmptyBatch));
    }

    #[test]
    fn prompt_contains_every_section_header_and_subject() {
        let records = vec![
            record("a", Some("Ada")),
            record("b", Some("Bela")),
            record("c", None),
        ];
        let request = PersonaRequest::new(records, "Composite Reviewer").expect("ok");
        let prompt = request.build_prompt();

        for (index, section) in PERSONA_SECTIONS.iter().enumerate() {
            assert!(
                prompt.contains(&format!("## {}. {}", index + 1, section.title)),
                "prompt missing section {}",
                section.title
            );
        }
        assert!(prompt.contains("## Subject 1: Ada"));
        assert!(prompt.contains("## Subject 3: Name unavailable"));
        assert!(prompt.contains("Composite Reviewer"));
    }

    #[test]
    fn prompt_marks_absent_fields_explicitly() {
        let request =
            PersonaRequest::new(vec![record("sparse", Some("Sparse"))], "Sparse").expect("ok");
        let prompt = request.build_prompt();
        assert!(prompt.contains("No experience data"));
        assert!(prompt.contains("No skills data"));
        assert!(prompt.contains("No about section"));
    }

    #[test]
    fn prompt_labels_failed_subjects_distinctly() {
        let failed = ProfileRecord::failed(
            ProfileIdentifier::parse("https://linkedin.com/in/blocked").expect("valid"),
            "login wall",
        );
        let request =
            PersonaRequest::new(vec![record("ok", Some("Ok")), failed], "Mixed").expect("ok");
        let prompt = request.build_prompt();
        assert!(prompt.contains("Extraction failed for this subject (login wall)"));
    }

    #[test]
    fn prompt_demands_numeric_scoring_and_avoid_behaviors() {
        let request = PersonaRequest::new(vec![record("x", Some("X"))], "X").expect("ok");
        let prompt = request.build_prompt();
        assert!(prompt.contains("rate content 1-10"));
        assert!(prompt.contains("NEVER do when creating content"));
    }

    #[test]
    fn synthesize_calls_backend_exactly_once() {
        let (provider, calls) = CannedProvider::conforming();
        let synthesizer = Synthesizer::new(Box::new(provider));
        let request = PersonaRequest::new(vec![record("one", Some("One"))], "One").expect("ok");
        let outcome = synthesizer.synthesize(request).expect("synthesis ok");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(outcome.document.is_conforming());
        assert_eq!(outcome.document.model, "test-model");
    }

    #[test]
    fn outcome_returns_full_batch_for_archival() {
        let (provider, _) = CannedProvider::conforming();
        let synthesizer = Synthesizer::new(Box::new(provider));
        let records = vec![record("a", Some("A")), record("b", None)];
        let request = PersonaRequest::new(records.clone(), "Pair").expect("ok");
        let outcome = synthesizer.synthesize(request).expect("synthesis ok");
        assert_eq!(outcome.records, records);
    }

    #[test]
    fn degraded_document_is_returned_not_rejected() {
        let provider = CannedProvider::with_body("## 1. PERSONA OVERVIEW\nonly one section");
        let synthesizer = Synthesizer::new(Box::new(provider));
        let request = PersonaRequest::new(vec![record("d", Some("D"))], "D").expect("ok");
        let outcome = synthesizer.synthesize(request).expect("still returned");
        assert!(!outcome.document.is_conforming());
        assert_eq!(outcome.document.structure.missing.len(), 11);
    }

    #[test]
    fn backend_failure_aborts_whole_batch() {
        let synthesizer = Synthesizer::new(Box::new(FailingProvider));
        let request = PersonaRequest::new(vec![record("f", Some("F"))], "F").expect("ok");
        let err = synthesizer.synthesize(request).expect_err("failure surfaces");
        assert!(matches!(err, SynthesisError::Generation(_)));
    }

    #[test]
    fn empty_backend_response_is_a_synthesis_failure() {
        let provider = CannedProvider::with_body("   \n");
        let synthesizer = Synthesizer::new(Box::new(provider));
        let request = PersonaRequest::new(vec![record("e", Some("E"))], "E").expect("ok");
        let err = synthesizer.synthesize(request).expect_err("empty rejected");
        assert!(matches!(err, SynthesisError::EmptyResponse));
    }

    #[test]
    fn check_structure_accepts_case_variation() {
        let mut body = String::new();
        for (index, section) in PERSONA_SECTIONS.iter().enumerate() {
            body.push_str(&format!(
                "## {}. {}\ntext\n",
                index + 1,
                section.title.to_lowercase()
            ));
        }
        assert!(check_structure(&body).is_conforming());
    }

    #[test]
    fn check_structure_flags_reordered_headers() {
        let mut body = String::new();
        let mut order: Vec<usize> = (0..PERSONA_SECTIONS.len()).collect();
        order.swap(2, 3);
        for index in order {
            body.push_str(&format!(
                "## {}. {}\ntext\n",
                index + 1,
                PERSONA_SECTIONS[index].title
            ));
        }
        let report = check_structure(&body);
        assert!(report.missing.is_empty());
        assert!(!report.in_order);
    }
}
