//! Credential fixtures for the login scenarios.
//!
//! Named variants plus the full invalid-submission matrix. The matrix is
//! static configuration: each case carries the credentials to submit, the
//! error surface the page is expected to show, and the substring the surface
//! must contain.

use serde::{Deserialize, Serialize};

/// An immutable username/password pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Account identifier
    pub username: String,
    /// Account secret
    pub password: String,
}

impl Credentials {
    /// Create a pair
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// The demo account that reaches the dashboard
    #[must_use]
    pub fn valid() -> Self {
        Self::new("Admin", "admin123")
    }

    /// Unknown username, correct password
    #[must_use]
    pub fn wrong_username() -> Self {
        Self::new("WrongUser123", "admin123")
    }

    /// Correct username, wrong password
    #[must_use]
    pub fn wrong_password() -> Self {
        Self::new("Admin", "wrongpass")
    }
}

/// Which error surface an invalid submission produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorSurface {
    /// Banner-level alert shown for any non-empty but incorrect combination
    Banner,
    /// Field-level marker shown for empty-field submission
    RequiredMarker,
}

impl ErrorSurface {
    /// Substring the surface must contain
    #[must_use]
    pub const fn expected_text(&self) -> &'static str {
        match self {
            Self::Banner => "Invalid credentials",
            Self::RequiredMarker => "Required",
        }
    }
}

/// One row of the invalid-login matrix
#[derive(Debug, Clone)]
pub struct InvalidLoginCase {
    /// Case label, used as part of the reported test name
    pub name: &'static str,
    /// Credentials to submit
    pub credentials: Credentials,
    /// Expected error surface
    pub surface: ErrorSurface,
}

impl InvalidLoginCase {
    fn banner(name: &'static str, username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            name,
            credentials: Credentials::new(username, password),
            surface: ErrorSurface::Banner,
        }
    }

    fn required(
        name: &'static str,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name,
            credentials: Credentials::new(username, password),
            surface: ErrorSurface::RequiredMarker,
        }
    }
}

/// The invalid-login matrix: every combination that must never reach the
/// dashboard, with the error surface it must produce
#[must_use]
pub fn invalid_login_cases() -> Vec<InvalidLoginCase> {
    vec![
        InvalidLoginCase::banner("invalid_username", "WrongUser123", "admin123"),
        InvalidLoginCase::banner("invalid_password", "Admin", "wrongpass"),
        InvalidLoginCase::required("empty_username_and_password", "", ""),
        InvalidLoginCase::banner("too_long_username", "a".repeat(101), "admin123"),
        InvalidLoginCase::banner("too_long_password", "Admin", "a".repeat(51)),
        InvalidLoginCase::banner("too_short_username", "Adm", "admin123"),
        InvalidLoginCase::banner("too_short_password", "Admin", "short"),
        InvalidLoginCase::banner("special_characters", "!@#$%", "^&*()"),
        InvalidLoginCase::banner("case_sensitive_username", "admin", "Admin123"),
    ]
}
