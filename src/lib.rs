#![warn(missing_docs)]
//! Core library entry points for the personagen pipeline.
//!
//! Two stages composed linearly: the [`extractor`] turns profile URLs into
//! best-effort [`record::ProfileRecord`]s through a controlled browser
//! session, and the [`synthesizer`] turns a batch of records into one
//! fixed-structure persona document via a single generation-backend call.

pub mod controls;
pub mod extractor;
pub mod identifier;
pub mod locator;
pub mod providers;
pub mod record;
pub mod runtime;
pub mod synthesizer;

pub use controls::{ScrapeArgs, ScrapeControls};
pub use extractor::{Extractor, ExtractorError};
pub use identifier::{parse_identifier_list, IdentifierError, ProfileIdentifier};
pub use providers::{AnthropicProvider, GenerationProvider, GenerationRequest, OpenAiProvider};
pub use record::{
    archive_from_json, archive_to_json, EducationEntry, ExperienceEntry, ExtractionStatus,
    ProfileRecord,
};
pub use runtime::{extract_all, synthesize};
pub use synthesizer::{
    check_structure, PersonaDocument, PersonaRequest, PersonaSection, StructureReport,
    SynthesisError, SynthesisOutcome, Synthesizer, PERSONA_SECTIONS,
};
