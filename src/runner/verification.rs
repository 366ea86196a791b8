//! The verification run: one smoke check per invocation
//!
//! Navigate to the app, wait for the start button to enable, verify the
//! background picker is absent, save a screenshot, report on stdout.

use std::time::Duration;

use tracing::{debug, info};

use crate::browser::{BrowserSession, Locator, Page};
use crate::core::{CheckOutcome, Config, Result, RunReport};

/// Drives a single verification run against the configured target.
///
/// The stdout lines it prints are the result protocol for surrounding
/// automation; the returned [`RunReport`] carries the same verdict for
/// library callers.
pub struct VerificationRunner {
    config: Config,
}

impl VerificationRunner {
    /// Create a runner with configuration loaded from file/env
    pub fn new() -> Self {
        Self {
            config: Config::load(),
        }
    }

    /// Create a runner with explicit configuration
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// The active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the smoke check.
    ///
    /// The browser session is released on every exit path: a readiness
    /// timeout or navigation failure propagates only after the Chromium
    /// process is gone. A visible background picker is not an error; it
    /// degrades to the FAIL line and a `Failed` outcome in the report.
    pub async fn run(&self) -> Result<RunReport> {
        self.config.validate()?;

        let session = BrowserSession::launch(&self.config.browser).await?;
        let result = self.drive(&session).await;
        session.close().await;
        result
    }

    async fn drive(&self, session: &BrowserSession) -> Result<RunReport> {
        let checks = &self.config.checks;
        let page = session.new_page().await?;

        info!("Navigating to {}", self.config.target.url);
        page.goto(&self.config.target.url).await?;

        // The app initializes WASM before enabling the button, so the
        // enabled state doubles as the page-ready signal.
        let readiness = Locator::button_with_text(&checks.readiness_text);
        let readiness_elapsed = page
            .wait_for_enabled(
                &readiness,
                Duration::from_millis(checks.readiness_timeout_ms),
                Duration::from_millis(checks.poll_interval_ms),
            )
            .await?;

        let absence = Locator::text(&checks.absence_text);
        let outcome = CheckOutcome::from_visible(page.is_visible(&absence).await?);
        println!("{}", outcome.report_line());

        self.save_screenshot(&page).await?;
        println!("Screenshot saved.");

        Ok(RunReport::new(
            outcome,
            self.config.artifact.path.clone(),
            readiness_elapsed,
        ))
    }

    async fn save_screenshot(&self, page: &Page) -> Result<()> {
        let bytes = page.screenshot(self.config.artifact.full_page).await?;

        let path = &self.config.artifact.path;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, &bytes).await?;

        debug!("Wrote {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }
}

impl Default for VerificationRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runner_holds_config() {
        let mut config = Config::default();
        config.set_url("http://127.0.0.1:9999/");
        let runner = VerificationRunner::with_config(config);
        assert_eq!(runner.config().target.url, "http://127.0.0.1:9999/");
    }

    #[tokio::test]
    async fn test_run_rejects_invalid_url_before_launching() {
        let mut config = Config::default();
        config.set_url("not a url");
        let err = VerificationRunner::with_config(config).run().await;
        assert!(err.is_err());
    }
}
