//! Best-effort profile extraction through a controlled browser session.
//!
//! One browser launch serves the whole batch; every subject gets a fresh
//! tab that is closed on every exit path. Page HTML is captured once after
//! the bounded reveal waits, then all field extraction runs over the parsed
//! document so the locator fallback logic stays pure.

use crate::controls::ScrapeControls;
use crate::identifier::ProfileIdentifier;
use crate::locator::{enclosing_section, LocatorSet};
use crate::record::{EducationEntry, ExperienceEntry, ProfileRecord};
use anyhow::Context as _;
use headless_chrome::{Browser, LaunchOptions, Tab};
use scraper::{ElementRef, Html};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Entry caps mirroring what the profile pages surface above the fold.
const MAX_EXPERIENCE_ENTRIES: usize = 5;
const MAX_EDUCATION_ENTRIES: usize = 3;
const MAX_SKILLS: usize = 10;
const MAX_ACTIVITY_SNIPPETS: usize = 3;
const ACTIVITY_SNIPPET_CHARS: usize = 500;

/// Section anchors that load asynchronously after initial render.
const REVEAL_ANCHORS: [&str; 3] = ["#experience", "#education", "#skills"];

/// Errors that abort the whole extraction stage.
///
/// Everything below browser launch is absorbed per subject and encoded in
/// the record's status instead of being raised.
#[derive(Debug)]
pub enum ExtractorError {
    /// The rendering engine could not start.
    BrowserLaunch {
        /// Launch failure detail.
        detail: String,
    },
}

impl fmt::Display for ExtractorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BrowserLaunch { detail } => {
                write!(f, "browser session could not be started: {detail}")
            }
        }
    }
}

impl std::error::Error for ExtractorError {}

/// Converts identifiers into best-effort profile records.
pub struct Extractor {
    browser: Browser,
    controls: ScrapeControls,
    locators: ProfileLocators,
}

impl Extractor {
    /// Launches the browser session shared by the batch.
    ///
    /// Launch failure is the only session-fatal condition in this stage.
    pub fn new(controls: ScrapeControls) -> Result<Self, ExtractorError> {
        let options = LaunchOptions::default_builder()
            .headless(controls.headless())
            .idle_browser_timeout(Duration::from_secs(600))
            .build()
            .map_err(|err| ExtractorError::BrowserLaunch {
                detail: err.to_string(),
            })?;
        let browser = Browser::new(options).map_err(|err| ExtractorError::BrowserLaunch {
            detail: format!("{err:#}"),
        })?;
        Ok(Self {
            browser,
            controls,
            locators: ProfileLocators::new(),
        })
    }

    /// Extracts one subject; never fails.
    ///
    /// Page-unreachable, login walls, and timeouts all collapse into a
    /// record carrying the identifier and a failure cause.
    #[tracing::instrument(skip(self), fields(subject = %identifier))]
    pub fn extract(&self, identifier: &ProfileIdentifier) -> ProfileRecord {
        match self.capture_page(identifier) {
            Ok(html) => {
                let document = Html::parse_document(&html);
                self.locators.parse_profile(&document, identifier.clone())
            }
            Err(err) => {
                tracing::warn!(cause = %format!("{err:#}"), "subject extraction failed");
                ProfileRecord::failed(identifier.clone(), format!("{err:#}"))
            }
        }
    }

    /// Navigates a fresh tab to the subject's page and returns its HTML.
    fn capture_page(&self, identifier: &ProfileIdentifier) -> anyhow::Result<String> {
        let tab = TabGuard::new(
            self.browser
                .new_tab()
                .context("failed to open a browser tab")?,
        );
        tab.inner().set_user_agent(USER_AGENT, None, None)?;
        tab.inner()
            .set_default_timeout(self.controls.page_load_timeout());
        tab.inner()
            .navigate_to(identifier.as_str())
            .context("navigation failed")?
            .wait_until_navigated()
            .context("page did not finish loading in time")?;

        let landed = tab.inner().get_url();
        if landed.contains("/authwall") || landed.contains("/login") || landed.contains("/uas/") {
            anyhow::bail!("page is behind a login wall");
        }

        // Expiry of any reveal wait means "section not found", never an error.
        for anchor in REVEAL_ANCHORS {
            let _ = tab
                .inner()
                .wait_for_element_with_custom_timeout(anchor, self.controls.reveal_timeout());
        }
        let _ = tab
            .inner()
            .evaluate("window.scrollTo(0, document.body.scrollHeight)", false);
        let _ = tab.inner().wait_for_element_with_custom_timeout(
            "div[class*='feed-shared-update-v2']",
            self.controls.reveal_timeout(),
        );

        tab.inner()
            .get_content()
            .context("failed to read page content")
    }
}

/// Scoped tab that is closed on every exit path, including panics.
struct TabGuard {
    inner: Arc<Tab>,
}

impl TabGuard {
    fn new(inner: Arc<Tab>) -> Self {
        Self { inner }
    }

    fn inner(&self) -> &Tab {
        &self.inner
    }
}

impl Drop for TabGuard {
    fn drop(&mut self) {
        let _ = self.inner.close(true);
    }
}

/// All locator sets for a profile page, built once per extractor.
struct ProfileLocators {
    name: LocatorSet,
    headline: LocatorSet,
    location: LocatorSet,
    summary: LocatorSet,
    experience_anchor: LocatorSet,
    experience_items: LocatorSet,
    experience_title: LocatorSet,
    experience_org: LocatorSet,
    experience_duration: LocatorSet,
    education_anchor: LocatorSet,
    education_items: LocatorSet,
    education_institution: LocatorSet,
    education_credential: LocatorSet,
    skills_anchor: LocatorSet,
    skill_items: LocatorSet,
    skill_name: LocatorSet,
    activity_items: LocatorSet,
    activity_text: LocatorSet,
}

impl ProfileLocators {
    fn new() -> Self {
        Self {
            name: LocatorSet::new(
                "display name",
                &[
                    "h1.text-heading-xlarge",
                    "h1.top-card-layout__title",
                    "h1[class*='pv-top-card']",
                    "main h1",
                ],
            ),
            headline: LocatorSet::new(
                "headline",
                &[
                    "div.text-body-medium.break-words",
                    "div.top-card-layout__headline",
                    "div[class*='pv-top-card--headline']",
                ],
            ),
            location: LocatorSet::new(
                "location",
                &[
                    "span.text-body-small.inline",
                    "span[class*='top-card__subline-item']",
                ],
            ),
            summary: LocatorSet::new(
                "summary",
                &[
                    "section[data-section='summary'] div.pv-shared-text-with-see-more",
                    "div[class*='about'] div[class*='text']",
                    "section[data-section='summary'] p",
                ],
            ),
            experience_anchor: LocatorSet::new("experience section", &["#experience"]),
            experience_items: LocatorSet::new(
                "experience entries",
                &["li.artdeco-list__item", "li[class*='experience-item']"],
            ),
            experience_title: LocatorSet::new(
                "experience title",
                &["div[class*='experience-item__title']", "h3"],
            ),
            experience_org: LocatorSet::new(
                "experience organization",
                &["span[class*='experience-item__subtitle']", "h4"],
            ),
            experience_duration: LocatorSet::new(
                "experience duration",
                &["span[class*='date-range']", "time"],
            ),
            education_anchor: LocatorSet::new("education section", &["#education"]),
            education_items: LocatorSet::new(
                "education entries",
                &["li.artdeco-list__item", "li[class*='education__item']"],
            ),
            education_institution: LocatorSet::new(
                "education institution",
                &["span[class*='education__school-name']", "h3"],
            ),
            education_credential: LocatorSet::new(
                "education credential",
                &["span[class*='education__degree']", "h4"],
            ),
            skills_anchor: LocatorSet::new("skills section", &["#skills"]),
            skill_items: LocatorSet::new(
                "skill entries",
                &["div[class*='skill-item']", "li[class*='skill']"],
            ),
            skill_name: LocatorSet::new("skill name", &["span[class*='skill-name']", "span"]),
            activity_items: LocatorSet::new(
                "activity entries",
                &[
                    "div[class*='feed-shared-update-v2']",
                    "li[class*='activity-item']",
                ],
            ),
            activity_text: LocatorSet::new("activity text", &["span[class*='break-words']", "p"]),
        }
    }

    /// Maps a captured page into a record; absence never raises.
    fn parse_profile(&self, document: &Html, identifier: ProfileIdentifier) -> ProfileRecord {
        let root = document.root_element();
        let mut record = ProfileRecord::new(identifier);

        record.display_name = self.name.resolve(root);
        record.headline = self.headline.resolve(root);
        record.location = self
            .location
            .resolve_where(root, |text| !text.starts_with("Contact"));
        record.summary = self.summary.resolve(root);

        if let Some(section) = self.section_scope(root, &self.experience_anchor) {
            for item in self.experience_items.elements(section, MAX_EXPERIENCE_ENTRIES) {
                let entry = ExperienceEntry {
                    title: self.experience_title.resolve(item),
                    organization: self.experience_org.resolve(item),
                    duration: self.experience_duration.resolve(item),
                };
                if entry.has_signal() {
                    record.experience.push(entry);
                }
            }
        }

        if let Some(section) = self.section_scope(root, &self.education_anchor) {
            for item in self.education_items.elements(section, MAX_EDUCATION_ENTRIES) {
                let entry = EducationEntry {
                    institution: self.education_institution.resolve(item),
                    credential: self.education_credential.resolve(item),
                };
                if entry.has_signal() {
                    record.education.push(entry);
                }
            }
        }

        if let Some(section) = self.section_scope(root, &self.skills_anchor) {
            for item in self.skill_items.elements(section, MAX_SKILLS) {
                if let Some(skill) = self.skill_name.resolve(item) {
                    record.push_skill(skill);
                }
            }
        }

        for item in self.activity_items.elements(root, MAX_ACTIVITY_SNIPPETS) {
            if let Some(text) = self.activity_text.resolve(item) {
                record.activity.push(clip_chars(&text, ACTIVITY_SNIPPET_CHARS));
            }
        }

        record.finalize_status();
        record
    }

    /// Resolves a section anchor and widens it to the enclosing `<section>`.
    fn section_scope<'a>(
        &self,
        root: ElementRef<'a>,
        anchor: &LocatorSet,
    ) -> Option<ElementRef<'a>> {
        let element = anchor.elements(root, 1).into_iter().next()?;
        if element.value().name() == "section" {
            return Some(element);
        }
        Some(enclosing_section(element).unwrap_or(element))
    }
}

/// Caps text at `max_chars`, marking the cut with a trailing ellipsis. Same
/// convention as the prompt-side clipping so archive and prompt read alike.
fn clip_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{cut}...")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ExtractionStatus;

    fn identifier() -> ProfileIdentifier {
        ProfileIdentifier::parse("https://linkedin.com/in/subject").expect("valid id")
    }

    fn parse(html: &str) -> ProfileRecord {
        let document = Html::parse_document(html);
        ProfileLocators::new().parse_profile(&document, identifier())
    }

    const FULL_PROFILE: &str = r#"
        <html><body><main>
          <h1 class="text-heading-xlarge">Sarah Chen</h1>
          <div class="text-body-medium break-words">VP of Engineering at TechCorp</div>
          <span class="text-body-small inline">San Francisco Bay Area</span>
          <section data-section="summary">
            <div class="pv-shared-text-with-see-more">Builds scalable systems.</div>
          </section>
          <section>
            <div id="experience"></div>
            <ul>
              <li class="artdeco-list__item">
                <div class="experience-item__title">VP Engineering</div>
                <span class="experience-item__subtitle">TechCorp</span>
                <span class="date-range">2020 - Present</span>
              </li>
              <li class="artdeco-list__item">
                <div class="experience-item__title">Director of Engineering</div>
              </li>
            </ul>
          </section>
          <section>
            <div id="education"></div>
            <ul>
              <li class="artdeco-list__item">
                <span class="education__school-name">Stanford</span>
                <span class="education__degree">MS Computer Science</span>
              </li>
            </ul>
          </section>
          <section>
            <div id="skills"></div>
            <div class="skill-item"><span class="skill-name">Leadership</span></div>
            <div class="skill-item"><span class="skill-name">leadership</span></div>
            <div class="skill-item"><span class="skill-name">Cloud Architecture</span></div>
          </section>
          <div class="feed-shared-update-v2">
            <span class="break-words">Excited to share our platform launch.</span>
          </div>
        </main></body></html>"#;

    #[test]
    fn full_profile_extracts_every_field() {
        let record = parse(FULL_PROFILE);
        assert_eq!(record.display_name.as_deref(), Some("Sarah Chen"));
        assert_eq!(
            record.headline.as_deref(),
            Some("VP of Engineering at TechCorp")
        );
        assert_eq!(record.location.as_deref(), Some("San Francisco Bay Area"));
        assert_eq!(record.summary.as_deref(), Some("Builds scalable systems."));
        assert_eq!(record.experience.len(), 2);
        assert_eq!(record.education.len(), 1);
        assert_eq!(record.skills, vec!["Leadership", "Cloud Architecture"]);
        assert_eq!(record.activity.len(), 1);
        assert_eq!(record.status, ExtractionStatus::Complete);
    }

    #[test]
    fn partial_experience_entries_are_kept() {
        let record = parse(FULL_PROFILE);
        let second = &record.experience[1];
        assert_eq!(second.title.as_deref(), Some("Director of Engineering"));
        assert_eq!(second.organization, None);
        assert_eq!(second.duration, None);
    }

    #[test]
    fn fallback_markup_shape_still_extracts() {
        let record = parse(
            r#"<html><body><main>
                <h1 class="top-card-layout__title">Older Markup</h1>
                <div class="top-card-layout__headline">Consultant</div>
                <span class="top-card__subline-item">Berlin</span>
            </main></body></html>"#,
        );
        assert_eq!(record.display_name.as_deref(), Some("Older Markup"));
        assert_eq!(record.headline.as_deref(), Some("Consultant"));
        assert_eq!(record.location.as_deref(), Some("Berlin"));
    }

    #[test]
    fn location_skips_contact_chrome() {
        let record = parse(
            r#"<html><body>
                <span class="text-body-small inline">Contact info</span>
                <span class="text-body-small inline">Porto, Portugal</span>
            </body></html>"#,
        );
        assert_eq!(record.location.as_deref(), Some("Porto, Portugal"));
    }

    #[test]
    fn empty_page_yields_valid_signalless_record() {
        let record = parse("<html><body></body></html>");
        assert!(!record.has_signal());
        assert_eq!(record.status, ExtractionStatus::Partial);
        assert_eq!(record.identifier, identifier());
    }

    #[test]
    fn experience_entries_are_capped() {
        let mut html = String::from("<html><body><section><div id='experience'></div><ul>");
        for i in 0..8 {
            html.push_str(&format!(
                "<li class='artdeco-list__item'><div class='experience-item__title'>Role {i}</div></li>"
            ));
        }
        html.push_str("</ul></section></body></html>");
        let record = parse(&html);
        assert_eq!(record.experience.len(), MAX_EXPERIENCE_ENTRIES);
    }

    #[test]
    fn experience_does_not_leak_into_education_section() {
        let record = parse(
            r#"<html><body>
                <section><div id="experience"></div>
                  <li class="artdeco-list__item"><div class="experience-item__title">Engineer</div></li>
                </section>
                <section><div id="education"></div>
                  <li class="artdeco-list__item"><span class="education__school-name">MIT</span></li>
                </section>
            </body></html>"#,
        );
        assert_eq!(record.experience.len(), 1);
        assert_eq!(record.education.len(), 1);
        assert_eq!(
            record.education[0].institution.as_deref(),
            Some("MIT")
        );
    }

    #[test]
    fn activity_snippets_are_clipped() {
        let long = "x".repeat(900);
        let html = format!(
            "<html><body><div class='feed-shared-update-v2'><span class='break-words'>{long}</span></div></body></html>"
        );
        let record = parse(&html);
        assert_eq!(
            record.activity[0].chars().count(),
            ACTIVITY_SNIPPET_CHARS + "...".len()
        );
        assert!(record.activity[0].ends_with("..."));
    }

    #[test]
    fn failed_record_carries_cause() {
        let record = ProfileRecord::failed(identifier(), "page is behind a login wall");
        match &record.status {
            ExtractionStatus::Failed { cause } => {
                assert!(cause.contains("login wall"));
            }
            other => panic!("expected failed status, got {other:?}"),
        }
    }
}
