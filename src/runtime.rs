//! Pipeline runner: identifiers through extraction into one synthesis call.

use crate::controls::ScrapeControls;
use crate::extractor::Extractor;
use crate::identifier::ProfileIdentifier;
use crate::record::{ExtractionStatus, ProfileRecord};
use crate::synthesizer::{PersonaRequest, SynthesisOutcome, Synthesizer};
use anyhow::{bail, Context, Result};
use std::thread::sleep;
use std::time::Instant;

/// Runs the synthesis stage over an already-extracted batch.
///
/// Callers are expected to archive the records before invoking this: the
/// generation call can fail long after the browser work is done, and the
/// extracted batch must survive that. Synthesis itself is all-or-nothing;
/// a structurally degraded document is warned about and returned anyway.
pub fn synthesize(
    records: Vec<ProfileRecord>,
    persona_name: &str,
    synthesizer: &Synthesizer,
) -> Result<SynthesisOutcome> {
    let total = records.len();
    let request = PersonaRequest::new(records, persona_name)
        .context("synthesis rejected the extracted batch")?;
    println!("synthesizing persona '{persona_name}' from {total} subjects...");
    let outcome = synthesizer
        .synthesize(request)
        .context("persona synthesis failed")?;
    if !outcome.document.is_conforming() {
        eprintln!(
            "warning: generated document is missing {} expected section header(s); \
             writing it anyway",
            outcome.document.structure.missing.len()
        );
    }
    Ok(outcome)
}

/// Runs only the extraction stage, order preserved, one record per input.
///
/// The pacing delay between consecutive subjects is the only intentional
/// suspension point here. Subject-level failures are absorbed into their
/// records; only a browser-launch failure (or an empty input batch) errors.
pub fn extract_all(
    identifiers: &[ProfileIdentifier],
    controls: ScrapeControls,
) -> Result<Vec<ProfileRecord>> {
    if identifiers.is_empty() {
        bail!("no profile identifiers supplied");
    }

    let started = Instant::now();
    let extractor = Extractor::new(controls.clone()).context("extraction stage aborted")?;

    let total = identifiers.len();
    let mut records = Vec::with_capacity(total);
    for (index, identifier) in identifiers.iter().enumerate() {
        if index > 0 {
            sleep(controls.pacing_delay());
        }
        println!("[{}/{}] extracting {}", index + 1, total, identifier);
        let record = extractor.extract(identifier);
        match &record.status {
            ExtractionStatus::Failed { cause } => {
                eprintln!("  extraction failed: {cause}");
            }
            _ => {
                let who = record.display_name.as_deref().unwrap_or("(name not found)");
                println!("  extracted: {who}");
            }
        }
        records.push(record);
    }

    let failed = records
        .iter()
        .filter(|record| record.status.is_failed())
        .count();
    println!(
        "--- extraction summary ({:.1}s) ---",
        started.elapsed().as_secs_f32()
    );
    println!("subjects attempted: {total}");
    println!("subjects failed: {failed}");

    Ok(records)
}
