//! Suite configuration: target URLs, report and screenshot destinations.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::session::SessionConfig;

/// Environment variable enabling the live-browser scenarios
pub const E2E_ENV: &str = "HCMPROBE_E2E";

/// Suite-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteConfig {
    /// Application root URL
    pub base_url: String,
    /// Login page path under the root
    pub login_path: String,
    /// Append-only outcome report destination
    pub report_path: PathBuf,
    /// Failure screenshot directory
    pub screenshot_dir: PathBuf,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://opensource-demo.orangehrmlive.com".to_string(),
            login_path: "/web/index.php/auth/login".to_string(),
            report_path: PathBuf::from("report.txt"),
            screenshot_dir: PathBuf::from("screenshots"),
        }
    }
}

impl SuiteConfig {
    /// Configuration with process-environment overrides applied
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Configuration with overrides supplied by `lookup`
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(url) = lookup("HCMPROBE_BASE_URL") {
            config.base_url = url;
        }
        if let Some(path) = lookup("HCMPROBE_REPORT") {
            config.report_path = PathBuf::from(path);
        }
        if let Some(dir) = lookup("HCMPROBE_SCREENSHOT_DIR") {
            config.screenshot_dir = PathBuf::from(dir);
        }
        config
    }

    /// Set the application root URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Full login page URL
    #[must_use]
    pub fn login_url(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            self.login_path
        )
    }

    /// Session configuration matching this suite configuration
    #[must_use]
    pub fn session(&self) -> SessionConfig {
        SessionConfig::default().with_screenshot_dir(self.screenshot_dir.clone())
    }
}

/// Whether the live-browser scenarios are enabled for this run
#[must_use]
pub fn e2e_enabled() -> bool {
    std::env::var(E2E_ENV).is_ok_and(|v| v == "1")
}
