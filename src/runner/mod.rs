//! Verification runner module
//!
//! The single-run orchestration over the browser session.

mod verification;

pub use verification::VerificationRunner;
