//! Login page object: credential entry, error surfaces, the forgot-password
//! flow, and branding checks.
//!
//! The page shows two distinct error surfaces: a field-level "Required"
//! marker for empty-field submission and a banner-level "Invalid credentials"
//! alert for any non-empty but incorrect combination. Callers pick the
//! surface they expect via [`ErrorSurface`].

use tracing::debug;

use crate::error::SuiteResult;
use crate::fixtures::{Credentials, ErrorSurface};
use crate::session::Session;
use crate::wait::WaitOptions;

/// Fixed locators for the login screen
pub mod locators {
    use crate::locator::Locator;

    /// Username input
    #[must_use]
    pub fn username_input() -> Locator {
        Locator::name("username")
    }

    /// Password input
    #[must_use]
    pub fn password_input() -> Locator {
        Locator::name("password")
    }

    /// Submit control
    #[must_use]
    pub fn submit_button() -> Locator {
        Locator::xpath("//button[@type='submit']")
    }

    /// Banner-level alert text
    #[must_use]
    pub fn error_banner() -> Locator {
        Locator::xpath("//p[contains(@class,'oxd-alert-content-text')]")
    }

    /// Field-level "Required" marker
    #[must_use]
    pub fn required_marker() -> Locator {
        Locator::xpath("//span[text()='Required']")
    }

    /// "Forgot your password?" link
    #[must_use]
    pub fn forgot_password_link() -> Locator {
        Locator::xpath("//p[contains(text(),'Forgot your password?')]")
    }

    /// Recovery identifier input on the reset screen
    #[must_use]
    pub fn reset_email_input() -> Locator {
        Locator::name("email")
    }

    /// Reset submit control
    #[must_use]
    pub fn reset_button() -> Locator {
        Locator::xpath("//button[text()='Reset Password']")
    }

    /// Reset confirmation text
    #[must_use]
    pub fn reset_confirmation() -> Locator {
        Locator::xpath("//p[contains(text(),'successfully')]")
    }

    /// Brand logo in the login branding column
    #[must_use]
    pub fn brand_logo() -> Locator {
        Locator::css("div.orangehrm-login-branding img")
    }
}

/// Page object for the login screen
#[derive(Debug)]
pub struct LoginPage<'a> {
    session: &'a Session,
    action_wait: WaitOptions,
    read_wait: WaitOptions,
}

impl<'a> LoginPage<'a> {
    /// Bind the page object to a session
    #[must_use]
    pub fn new(session: &'a Session) -> Self {
        Self {
            session,
            action_wait: WaitOptions::action(),
            read_wait: WaitOptions::read(),
        }
    }

    /// Override the wait budgets (hermetic tests use short ones)
    #[must_use]
    pub const fn with_waits(mut self, action: WaitOptions, read: WaitOptions) -> Self {
        self.action_wait = action;
        self.read_wait = read;
        self
    }

    /// Wait for the username input, clear it, type `value`
    pub async fn enter_username(&self, value: &str) -> SuiteResult<()> {
        let field = locators::username_input();
        self.session.wait_displayed(&field, self.action_wait).await?;
        self.session.clear_and_type(&field, value).await
    }

    /// Wait for the password input, clear it, type `value`
    pub async fn enter_password(&self, value: &str) -> SuiteResult<()> {
        let field = locators::password_input();
        self.session.wait_displayed(&field, self.action_wait).await?;
        self.session.clear_and_type(&field, value).await
    }

    /// Wait for the submit control to be clickable, then activate it
    pub async fn submit(&self) -> SuiteResult<()> {
        let button = locators::submit_button();
        self.session.wait_clickable(&button, self.action_wait).await?;
        self.session.click(&button).await
    }

    /// Enter both credentials and submit
    pub async fn login(&self, credentials: &Credentials) -> SuiteResult<()> {
        debug!(username = %credentials.username, "submitting login form");
        self.enter_username(&credentials.username).await?;
        self.enter_password(&credentials.password).await?;
        self.submit().await
    }

    /// Text of the banner-level error alert
    pub async fn error_banner_text(&self) -> SuiteResult<String> {
        let banner = locators::error_banner();
        self.session.wait_displayed(&banner, self.read_wait).await?;
        self.session.text(&banner).await
    }

    /// Text of the field-level "Required" marker
    pub async fn required_marker_text(&self) -> SuiteResult<String> {
        let marker = locators::required_marker();
        self.session.wait_displayed(&marker, self.read_wait).await?;
        self.session.text(&marker).await
    }

    /// Text of the given error surface
    pub async fn error_text(&self, surface: ErrorSurface) -> SuiteResult<String> {
        match surface {
            ErrorSurface::Banner => self.error_banner_text().await,
            ErrorSurface::RequiredMarker => self.required_marker_text().await,
        }
    }

    /// Is the username input visible
    pub async fn username_field_visible(&self) -> SuiteResult<bool> {
        self.visible(&locators::username_input()).await
    }

    /// Is the password input visible
    pub async fn password_field_visible(&self) -> SuiteResult<bool> {
        self.visible(&locators::password_input()).await
    }

    /// Is the submit control visible
    pub async fn submit_visible(&self) -> SuiteResult<bool> {
        self.visible(&locators::submit_button()).await
    }

    /// Is the brand logo visible
    pub async fn brand_logo_visible(&self) -> SuiteResult<bool> {
        self.visible(&locators::brand_logo()).await
    }

    /// Open the forgot-password flow
    pub async fn open_forgot_password(&self) -> SuiteResult<()> {
        let link = locators::forgot_password_link();
        self.session.wait_clickable(&link, self.action_wait).await?;
        self.session.click(&link).await
    }

    /// Enter the recovery identifier on the reset screen
    pub async fn enter_recovery_identifier(&self, value: &str) -> SuiteResult<()> {
        let field = locators::reset_email_input();
        self.session.wait_displayed(&field, self.read_wait).await?;
        self.session.clear_and_type(&field, value).await
    }

    /// Submit the reset request
    pub async fn submit_reset(&self) -> SuiteResult<()> {
        let button = locators::reset_button();
        self.session.wait_clickable(&button, self.read_wait).await?;
        self.session.click(&button).await
    }

    /// Confirmation text shown after a reset request
    pub async fn reset_confirmation_text(&self) -> SuiteResult<String> {
        let message = locators::reset_confirmation();
        self.session.wait_displayed(&message, self.read_wait).await?;
        self.session.text(&message).await
    }

    async fn visible(&self, locator: &crate::locator::Locator) -> SuiteResult<bool> {
        self.session.wait_displayed(locator, self.read_wait).await?;
        self.session.is_displayed(locator).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod locator_tests {
        use super::*;

        #[test]
        fn test_credential_inputs_use_name_strategy() {
            assert_eq!(locators::username_input().key(), "name=username");
            assert_eq!(locators::password_input().key(), "name=password");
        }

        #[test]
        fn test_error_surfaces_are_distinct() {
            assert_ne!(locators::error_banner(), locators::required_marker());
        }

        #[test]
        fn test_submit_targets_submit_type() {
            assert!(locators::submit_button().value().contains("@type='submit'"));
        }
    }

    #[cfg(not(feature = "browser"))]
    mod behavior_tests {
        use super::*;
        use crate::session::{MockElement, Session, SessionConfig};

        fn fast() -> WaitOptions {
            WaitOptions::new().with_timeout(60).with_poll_interval(5)
        }

        async fn scripted_login_session() -> Session {
            let session = Session::acquire(SessionConfig::default().with_implicit_wait(40))
                .await
                .unwrap();
            session.script_element(&locators::username_input(), MockElement::new("input"));
            session.script_element(&locators::password_input(), MockElement::new("input"));
            session.script_element(&locators::submit_button(), MockElement::new("button"));
            session
        }

        #[tokio::test]
        async fn test_login_fills_both_fields_and_submits() {
            let session = scripted_login_session().await;
            let page = LoginPage::new(&session).with_waits(fast(), fast());

            page.login(&Credentials::valid()).await.unwrap();

            assert!(session.was_called("fill:name=username:Admin"));
            assert!(session.was_called("fill:name=password:admin123"));
            assert!(session.was_called("click:xpath=//button[@type='submit']"));
        }

        #[tokio::test]
        async fn test_enter_username_times_out_when_field_hidden() {
            let session = scripted_login_session().await;
            session.script_element(&locators::username_input(), MockElement::new("input").hidden());
            let page = LoginPage::new(&session).with_waits(fast(), fast());

            let err = page.enter_username("Admin").await.unwrap_err();
            assert!(err.is_timeout());
            assert!(!session.was_called("fill:name=username"));
        }

        #[tokio::test]
        async fn test_submit_times_out_on_disabled_button() {
            let session = scripted_login_session().await;
            session.script_element(&locators::submit_button(), MockElement::new("button").disabled());
            let page = LoginPage::new(&session).with_waits(fast(), fast());

            let err = page.submit().await.unwrap_err();
            assert!(err.is_timeout());
        }

        #[tokio::test]
        async fn test_error_surfaces_read_their_own_locators() {
            let session = scripted_login_session().await;
            session.script_element(
                &locators::error_banner(),
                MockElement::new("p").with_text("Invalid credentials"),
            );
            session.script_element(
                &locators::required_marker(),
                MockElement::new("span").with_text("Required"),
            );
            let page = LoginPage::new(&session).with_waits(fast(), fast());

            assert_eq!(
                page.error_text(ErrorSurface::Banner).await.unwrap(),
                "Invalid credentials"
            );
            assert_eq!(
                page.error_text(ErrorSurface::RequiredMarker).await.unwrap(),
                "Required"
            );
        }

        #[tokio::test]
        async fn test_ui_presence_checks() {
            let session = scripted_login_session().await;
            session.script_element(&locators::brand_logo(), MockElement::new("img"));
            let page = LoginPage::new(&session).with_waits(fast(), fast());

            assert!(page.username_field_visible().await.unwrap());
            assert!(page.password_field_visible().await.unwrap());
            assert!(page.submit_visible().await.unwrap());
            assert!(page.brand_logo_visible().await.unwrap());
        }

        #[tokio::test]
        async fn test_forgot_password_flow() {
            let session = scripted_login_session().await;
            session.script_element(&locators::forgot_password_link(), MockElement::new("p"));
            session.script_element(&locators::reset_email_input(), MockElement::new("input"));
            session.script_element(&locators::reset_button(), MockElement::new("button"));
            session.script_element(
                &locators::reset_confirmation(),
                MockElement::new("p").with_text("Reset Password link sent successfully"),
            );
            let page = LoginPage::new(&session).with_waits(fast(), fast());

            page.open_forgot_password().await.unwrap();
            page.enter_recovery_identifier("Admin").await.unwrap();
            page.submit_reset().await.unwrap();
            let confirmation = page.reset_confirmation_text().await.unwrap();
            assert!(confirmation.contains("successfully"));
        }
    }
}
