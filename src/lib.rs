//! smokecheck - Start-screen smoke check for the recorder app
//!
//! Drives a headless Chromium over the DevTools protocol: loads the app,
//! waits for the "Start Recording" button to become enabled, verifies the
//! background picker is absent from the start screen, and saves a
//! screenshot.
//!
//! # Architecture
//!
//! - **Core**: configuration, error handling, and shared types
//! - **Browser**: scoped Chromium session, locators, and page operations
//! - **Runner**: the single-run verification sequence
//!
//! # Usage
//!
//! ```rust,no_run
//! use smokecheck::{Config, VerificationRunner};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let runner = VerificationRunner::with_config(Config::load());
//!     let report = runner.run().await?;
//!     println!("outcome: {}", report.outcome);
//!     Ok(())
//! }
//! ```

pub mod browser;
pub mod core;
pub mod runner;

// Re-export commonly used items
pub use crate::core::{CheckOutcome, Config, Result, RunReport, SmokecheckError};
pub use runner::VerificationRunner;
