//! Page operations: navigation, readiness polling, visibility, screenshots

use std::time::{Duration, Instant};

use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::page::ScreenshotParams;
use tracing::debug;

use crate::browser::locator::Locator;
use crate::core::{Result, SmokecheckError};

/// A tab bound to the browser session
pub struct Page {
    inner: chromiumoxide::Page,
}

impl Page {
    pub(crate) fn new(inner: chromiumoxide::Page) -> Self {
        Self { inner }
    }

    /// Navigate to a URL. An unreachable target is fatal; there is no retry.
    pub async fn goto(&self, url: &str) -> Result<()> {
        self.inner
            .goto(url)
            .await
            .map_err(|e| SmokecheckError::navigation(url, e.to_string()))?;
        Ok(())
    }

    /// Evaluate a boolean expression in the page
    async fn probe(&self, expr: &str) -> Result<bool> {
        let result = self.inner.evaluate(expr).await?;
        Ok(result.into_value::<bool>()?)
    }

    /// Poll until the locator's element is enabled, up to `timeout`.
    ///
    /// Probe failures while the page is still initializing count as
    /// not-ready rather than aborting the wait. Returns the elapsed wait on
    /// success; a `ReadinessTimeout` error once the bound expires.
    pub async fn wait_for_enabled(
        &self,
        locator: &Locator,
        timeout: Duration,
        poll_interval: Duration,
    ) -> Result<Duration> {
        let expr = locator.enabled_expr();
        let start = Instant::now();

        loop {
            if matches!(self.probe(&expr).await, Ok(true)) {
                let elapsed = start.elapsed();
                debug!(
                    "{} enabled after {}ms",
                    locator.description(),
                    elapsed.as_millis()
                );
                return Ok(elapsed);
            }

            if start.elapsed() >= timeout {
                return Err(SmokecheckError::ReadinessTimeout {
                    locator: locator.description(),
                    timeout_ms: timeout.as_millis() as u64,
                });
            }

            tokio::time::sleep(poll_interval).await;
        }
    }

    /// One-shot visibility probe of the locator
    pub async fn is_visible(&self, locator: &Locator) -> Result<bool> {
        self.probe(&locator.visible_expr()).await
    }

    /// Capture a PNG screenshot of the page
    pub async fn screenshot(&self, full_page: bool) -> Result<Vec<u8>> {
        let bytes = self
            .inner
            .screenshot(
                ScreenshotParams::builder()
                    .format(CaptureScreenshotFormat::Png)
                    .full_page(full_page)
                    .build(),
            )
            .await?;
        Ok(bytes)
    }
}
