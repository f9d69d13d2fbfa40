//! Extraction throttle and browser-session controls.

use clap::Args;
use std::time::Duration;

/// Tunable knobs that bound extraction behavior.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeControls {
    headless: bool,
    page_load_timeout: Duration,
    reveal_timeout: Duration,
    pacing_delay: Duration,
}

impl ScrapeControls {
    /// Constructs a new set of scrape controls.
    pub fn new(
        headless: bool,
        page_load_timeout: Duration,
        reveal_timeout: Duration,
        pacing_delay: Duration,
    ) -> Self {
        Self {
            headless,
            page_load_timeout,
            reveal_timeout,
            pacing_delay,
        }
    }

    /// Whether the browser runs without a visible window.
    pub fn headless(&self) -> bool {
        self.headless
    }

    /// Maximum time to wait for initial page navigation.
    pub fn page_load_timeout(&self) -> Duration {
        self.page_load_timeout
    }

    /// Maximum time to wait for a lazily revealed section before recording
    /// it absent.
    pub fn reveal_timeout(&self) -> Duration {
        self.reveal_timeout
    }

    /// Deliberate pause between consecutive subjects in a batch.
    pub fn pacing_delay(&self) -> Duration {
        self.pacing_delay
    }
}

impl Default for ScrapeControls {
    fn default() -> Self {
        Self {
            headless: true,
            page_load_timeout: Duration::from_secs(30),
            reveal_timeout: Duration::from_secs(5),
            pacing_delay: Duration::from_secs(2),
        }
    }
}

/// Command-line arguments shared by binaries that drive extraction.
#[derive(Args, Debug, Clone)]
pub struct ScrapeArgs {
    /// Run the browser with a visible window (debugging aid)
    #[arg(long, env = "PERSONAGEN_HEADFUL", default_value_t = false)]
    pub headful: bool,

    /// Seconds to wait for a profile page to load
    #[arg(long, env = "PERSONAGEN_PAGE_TIMEOUT_SECS", default_value_t = 30)]
    pub page_timeout_secs: u64,

    /// Seconds to wait for lazily loaded sections before treating them as absent
    #[arg(long, env = "PERSONAGEN_REVEAL_TIMEOUT_SECS", default_value_t = 5)]
    pub reveal_timeout_secs: u64,

    /// Milliseconds to pause between consecutive profiles
    #[arg(long, env = "PERSONAGEN_PACING_MS", default_value_t = 2000)]
    pub pacing_ms: u64,
}

impl ScrapeArgs {
    /// Converts the parsed arguments into `ScrapeControls`.
    pub fn build_controls(&self) -> ScrapeControls {
        ScrapeControls::new(
            !self.headful,
            Duration::from_secs(self.page_timeout_secs),
            Duration::from_secs(self.reveal_timeout_secs),
            Duration::from_millis(self.pacing_ms),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_headless_with_bounded_waits() {
        let controls = ScrapeControls::default();
        assert!(controls.headless());
        assert!(controls.page_load_timeout() >= controls.reveal_timeout());
    }

    #[test]
    fn args_map_onto_controls() {
        let args = ScrapeArgs {
            headful: true,
            page_timeout_secs: 10,
            reveal_timeout_secs: 3,
            pacing_ms: 500,
        };
        let controls = args.build_controls();
        assert!(!controls.headless());
        assert_eq!(controls.page_load_timeout(), Duration::from_secs(10));
        assert_eq!(controls.reveal_timeout(), Duration::from_secs(3));
        assert_eq!(controls.pacing_delay(), Duration::from_millis(500));
    }
}
