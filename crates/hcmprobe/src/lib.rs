//! hcmprobe: end-to-end regression suite for the OrangeHRM demo application.
//!
//! The reusable core is a session manager (one browser per test, guaranteed
//! teardown with failure screenshots), page objects for the login and
//! dashboard screens (locator tables plus wait-wrapped accessors), and an
//! append-only outcome reporter. Test scenarios live under `tests/` and
//! consume this crate.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  Scenario (tests/)                                               │
//! │     │ acquire                                                    │
//! │     ▼                                                            │
//! │  Session ──── wait_for(probe, budget) ──── remote DOM            │
//! │     ▲                                                            │
//! │     │ bound to                                                   │
//! │  LoginPage / DashboardPage (fixed locator tables)                │
//! │     │ verdicts                                                   │
//! │     ▼                                                            │
//! │  ReportSink (append-only "name → VERDICT" lines)                 │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! With the `browser` feature the session drives headless Chromium over CDP;
//! without it a scripted in-memory session backs the same API, so the locator
//! catalog, waits, page objects, and reporter are tested hermetically.

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod fixtures;
pub mod locator;
pub mod pages;
pub mod report;
pub mod session;
pub mod wait;

pub use config::SuiteConfig;
pub use error::{SuiteError, SuiteResult};
pub use fixtures::{Credentials, ErrorSurface, InvalidLoginCase};
pub use locator::{Locator, Strategy};
pub use pages::{DashboardPage, LoginPage, MenuState};
pub use report::{FileReport, MemoryReport, OutcomeRecord, ReportSink, Verdict};
pub use session::{ElementSnapshot, Session, SessionConfig};
pub use wait::WaitOptions;

/// Initialize tracing for a test process.
///
/// Respects `RUST_LOG`; defaults to `info` for this crate. Safe to call from
/// every test; only the first call installs a subscriber.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("hcmprobe=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
