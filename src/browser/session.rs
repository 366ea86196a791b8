//! Scoped browser session over the DevTools protocol
//!
//! Owns the Chromium child process and the CDP event-handler task. The
//! session is acquired with `launch` and released with `close`; dropping an
//! unclosed session still kills the child through chromiumoxide's own
//! cleanup.

use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::browser::page::Page;
use crate::core::{BrowserSettings, Result, SmokecheckError};

/// Launch flags granting fake media-device permissions, so the page under
/// test never blocks on a real camera/microphone prompt.
const FAKE_MEDIA_ARGS: [&str; 2] = [
    "--use-fake-ui-for-media-stream",
    "--use-fake-device-for-media-stream",
];

/// A running Chromium instance bound to this verification run
pub struct BrowserSession {
    browser: Browser,
    handler_handle: JoinHandle<()>,
}

impl BrowserSession {
    /// Launch Chromium with the given settings and start the CDP event loop
    pub async fn launch(settings: &BrowserSettings) -> Result<Self> {
        let config = build_config(settings)?;

        info!("Launching {} Chromium", if settings.headed { "headed" } else { "headless" });
        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| SmokecheckError::browser(format!("Failed to launch browser: {}", e)))?;

        // The handler pumps WebSocket messages between us and Chromium; it
        // runs until the connection drops.
        let handler_handle = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    debug!("CDP handler event loop ended");
                    break;
                }
            }
        });

        Ok(Self {
            browser,
            handler_handle,
        })
    }

    /// Open a new blank tab
    pub async fn new_page(&self) -> Result<Page> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| SmokecheckError::browser(format!("Failed to create page: {}", e)))?;
        Ok(Page::new(page))
    }

    /// Release the session: close the browser, reap the child process, stop
    /// the handler task. Close errors degrade to a warning rather than
    /// failing the caller, which by this point already holds its verdict.
    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            warn!("Error closing browser: {}", e);
        }
        if let Err(e) = self.browser.wait().await {
            warn!("Error waiting for browser exit: {}", e);
        }
        self.handler_handle.abort();
        debug!("Browser session released");
    }
}

fn build_config(settings: &BrowserSettings) -> Result<BrowserConfig> {
    let mut builder =
        BrowserConfig::builder().window_size(settings.window_width, settings.window_height);

    for arg in FAKE_MEDIA_ARGS {
        builder = builder.arg(arg);
    }

    if settings.headed {
        builder = builder.with_head();
    }

    if settings.no_sandbox {
        builder = builder.no_sandbox();
    }

    if let Some(ref path) = settings.chrome_path {
        builder = builder.chrome_executable(path);
    }

    builder.build().map_err(SmokecheckError::Browser)
}
