//! Browser session lifecycle and element operations.
//!
//! One session per test case: [`Session::acquire`] launches the browser,
//! sizes the viewport, and arms the session-wide implicit wait;
//! [`Session::release`] captures a best-effort failure screenshot and then
//! unconditionally closes the browser. No pooling, no reuse across tests.
//!
//! With the `browser` feature the session drives real Chromium over CDP.
//! Without it, a scripted in-memory twin backs the same API so page-object
//! and wait logic runs hermetically.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::SuiteResult;
use crate::wait::{WaitOptions, DEFAULT_POLL_INTERVAL_MS};

/// Session-wide implicit element-wait, in milliseconds.
///
/// A blanket fallback applied to every lookup that is not covered by an
/// explicit per-operation wait.
pub const DEFAULT_IMPLICIT_WAIT_MS: u64 = 5_000;

/// Browser session configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Run in headless mode
    pub headless: bool,
    /// Viewport width (headless stand-in for a maximized window)
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
    /// Implicit element-wait budget in milliseconds
    pub implicit_wait_ms: u64,
    /// Directory receiving failure screenshots
    pub screenshot_dir: PathBuf,
    /// Path to chromium binary (None = auto-detect)
    pub chromium_path: Option<String>,
    /// Sandbox mode (disable for containers)
    pub sandbox: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            headless: true,
            viewport_width: 1920,
            viewport_height: 1080,
            implicit_wait_ms: DEFAULT_IMPLICIT_WAIT_MS,
            screenshot_dir: PathBuf::from("screenshots"),
            chromium_path: None,
            sandbox: true,
        }
    }
}

impl SessionConfig {
    /// Set viewport dimensions
    #[must_use]
    pub const fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set the implicit wait budget
    #[must_use]
    pub const fn with_implicit_wait(mut self, ms: u64) -> Self {
        self.implicit_wait_ms = ms;
        self
    }

    /// Set the failure-screenshot directory
    #[must_use]
    pub fn with_screenshot_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.screenshot_dir = dir.into();
        self
    }

    /// Set the chromium binary path
    #[must_use]
    pub fn with_chromium_path(mut self, path: impl Into<String>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }

    /// Disable the sandbox (for containers/CI)
    #[must_use]
    pub const fn with_no_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }

    /// Wait options for the implicit fallback budget
    #[must_use]
    pub const fn implicit_options(&self) -> WaitOptions {
        WaitOptions {
            timeout_ms: self.implicit_wait_ms,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

/// Snapshot of one matched element at lookup time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementSnapshot {
    /// Lower-case tag name
    pub tag: String,
    /// Trimmed text content
    pub text: String,
    /// Whether the element was rendered and visible
    pub visible: bool,
}

/// Failure-screenshot destination, keyed by test name
fn screenshot_path(dir: &Path, test_name: &str) -> PathBuf {
    dir.join(format!("{test_name}.png"))
}

/// Persist a captured failure screenshot, best-effort.
///
/// A capture or write failure is logged and swallowed; it must not mask the
/// underlying test failure during teardown.
fn persist_failure_screenshot(dir: &Path, test_name: &str, capture: SuiteResult<Vec<u8>>) {
    match capture {
        Ok(bytes) => {
            let path = screenshot_path(dir, test_name);
            let write = std::fs::create_dir_all(dir).and_then(|()| std::fs::write(&path, &bytes));
            match write {
                Ok(()) => info!(test = test_name, path = %path.display(), "failure screenshot saved"),
                Err(e) => {
                    warn!(test = test_name, error = %e, "failed to persist failure screenshot");
                }
            }
        }
        Err(e) => warn!(test = test_name, error = %e, "failed to capture failure screenshot"),
    }
}

// ============================================================================
// Real CDP implementation (when the `browser` feature is enabled)
// ============================================================================

#[cfg(feature = "browser")]
mod cdp {
    use std::sync::Arc;

    use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
    use chromiumoxide::cdp::browser_protocol::page::{
        CaptureScreenshotFormat, CaptureScreenshotParams,
    };
    use chromiumoxide::page::Page as CdpPage;
    use futures::StreamExt;
    use serde::de::DeserializeOwned;
    use tokio::sync::Mutex;
    use tracing::{debug, info};

    use super::{persist_failure_screenshot, SessionConfig};
    use crate::error::{SuiteError, SuiteResult};
    use crate::locator::Locator;
    use crate::session::ElementSnapshot;
    use crate::wait::{wait_for, WaitOptions};

    /// One live browser session over CDP
    #[derive(Debug)]
    pub struct Session {
        config: SessionConfig,
        browser: Arc<Mutex<CdpBrowser>>,
        page: Arc<Mutex<CdpPage>>,
        #[allow(dead_code)]
        handle: tokio::task::JoinHandle<()>,
    }

    impl Session {
        /// Launch a browser and open a blank page.
        ///
        /// Applies the configured viewport and arms the implicit wait used as
        /// the fallback budget for every element lookup on this session.
        pub async fn acquire(config: SessionConfig) -> SuiteResult<Self> {
            let mut builder = CdpConfig::builder()
                .window_size(config.viewport_width, config.viewport_height);

            if !config.headless {
                builder = builder.with_head();
            }
            if !config.sandbox {
                builder = builder.no_sandbox();
            }
            if let Some(ref path) = config.chromium_path {
                builder = builder.chrome_executable(path);
            }

            let cdp_config = builder.build().map_err(|e| SuiteError::BrowserLaunch {
                message: e.to_string(),
            })?;

            let (browser, mut handler) =
                CdpBrowser::launch(cdp_config)
                    .await
                    .map_err(|e| SuiteError::BrowserLaunch {
                        message: e.to_string(),
                    })?;

            let handle = tokio::spawn(async move {
                while let Some(h) = handler.next().await {
                    if h.is_err() {
                        break;
                    }
                }
            });

            let page =
                browser
                    .new_page("about:blank")
                    .await
                    .map_err(|e| SuiteError::BrowserLaunch {
                        message: e.to_string(),
                    })?;

            info!(
                width = config.viewport_width,
                height = config.viewport_height,
                implicit_wait_ms = config.implicit_wait_ms,
                "browser session acquired"
            );

            Ok(Self {
                config,
                browser: Arc::new(Mutex::new(browser)),
                page: Arc::new(Mutex::new(page)),
                handle,
            })
        }

        /// Get the session configuration
        #[must_use]
        pub const fn config(&self) -> &SessionConfig {
            &self.config
        }

        async fn eval<T: DeserializeOwned>(&self, expr: &str) -> SuiteResult<T> {
            let page = self.page.lock().await;
            let result = page.evaluate(expr).await.map_err(|e| SuiteError::Eval {
                message: e.to_string(),
            })?;
            result.into_value().map_err(|e| SuiteError::Eval {
                message: e.to_string(),
            })
        }

        async fn eval_bool(&self, expr: &str) -> SuiteResult<bool> {
            self.eval(expr).await
        }

        /// Wait up to the implicit budget for the locator to match anything
        async fn wait_present_implicit(&self, locator: &Locator) -> SuiteResult<()> {
            let expr = format!("!!({})", locator.element_query());
            wait_for(
                || self.eval_bool(&expr),
                &format!("presence of {locator}"),
                self.config.implicit_options(),
            )
            .await
        }

        /// Navigate to a URL
        pub async fn goto(&self, url: &str) -> SuiteResult<()> {
            debug!(url, "navigating");
            let page = self.page.lock().await;
            page.goto(url).await.map_err(|e| SuiteError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            })?;
            Ok(())
        }

        /// Current page URL
        pub async fn current_url(&self) -> SuiteResult<String> {
            self.eval("location.href").await
        }

        /// Navigate back in history
        pub async fn go_back(&self) -> SuiteResult<()> {
            // Comma expression keeps the evaluation result decodable.
            self.eval_bool("(history.back(), true)").await?;
            Ok(())
        }

        /// Is the first match rendered and visible right now
        pub async fn is_displayed(&self, locator: &Locator) -> SuiteResult<bool> {
            self.eval_bool(&locator.displayed_probe()).await
        }

        /// Is the match at `index` rendered and visible right now
        pub async fn is_nth_displayed(&self, locator: &Locator, index: usize) -> SuiteResult<bool> {
            self.eval_bool(&locator.nth_displayed_probe(index)).await
        }

        /// Is the first match visible and enabled
        pub async fn is_clickable(&self, locator: &Locator) -> SuiteResult<bool> {
            self.eval_bool(&locator.clickable_probe()).await
        }

        /// Trimmed text content of the first match
        pub async fn text(&self, locator: &Locator) -> SuiteResult<String> {
            self.wait_present_implicit(locator).await?;
            let value: Option<String> = self.eval(&locator.text_query()).await?;
            value.ok_or_else(|| SuiteError::Eval {
                message: format!("{locator} vanished before read"),
            })
        }

        /// Value property of the first matching input
        pub async fn input_value(&self, locator: &Locator) -> SuiteResult<String> {
            self.wait_present_implicit(locator).await?;
            let value: Option<String> = self.eval(&locator.value_query()).await?;
            value.ok_or_else(|| SuiteError::Eval {
                message: format!("{locator} vanished before read"),
            })
        }

        /// Named attribute of the first match
        pub async fn attribute(
            &self,
            locator: &Locator,
            attribute: &str,
        ) -> SuiteResult<Option<String>> {
            self.wait_present_implicit(locator).await?;
            self.eval(&locator.attribute_query(attribute)).await
        }

        /// Number of current matches (zero is a valid outcome)
        pub async fn count(&self, locator: &Locator) -> SuiteResult<usize> {
            self.eval(&locator.count_query()).await
        }

        /// Snapshots of all current matches
        pub async fn elements(&self, locator: &Locator) -> SuiteResult<Vec<ElementSnapshot>> {
            self.eval(&locator.snapshot_query()).await
        }

        /// Click the first match
        pub async fn click(&self, locator: &Locator) -> SuiteResult<()> {
            self.wait_present_implicit(locator).await?;
            if self.eval_bool(&locator.click_script()).await? {
                Ok(())
            } else {
                Err(SuiteError::Eval {
                    message: format!("{locator} vanished before click"),
                })
            }
        }

        /// Click the match at `index`
        pub async fn click_nth(&self, locator: &Locator, index: usize) -> SuiteResult<()> {
            if self.eval_bool(&locator.click_nth_script(index)).await? {
                Ok(())
            } else {
                Err(SuiteError::Eval {
                    message: format!("{locator}[{index}] vanished before click"),
                })
            }
        }

        /// Clear the first matching input and type `value`
        pub async fn clear_and_type(&self, locator: &Locator, value: &str) -> SuiteResult<()> {
            self.wait_present_implicit(locator).await?;
            if self.eval_bool(&locator.fill_script(value)).await? {
                Ok(())
            } else {
                Err(SuiteError::Eval {
                    message: format!("{locator} vanished before input"),
                })
            }
        }

        /// Wait for the first match to be visible
        pub async fn wait_displayed(
            &self,
            locator: &Locator,
            options: WaitOptions,
        ) -> SuiteResult<()> {
            let expr = locator.displayed_probe();
            wait_for(
                || self.eval_bool(&expr),
                &format!("visibility of {locator}"),
                options,
            )
            .await
        }

        /// Wait for the first match to be absent or hidden
        pub async fn wait_hidden(&self, locator: &Locator, options: WaitOptions) -> SuiteResult<()> {
            let expr = locator.displayed_probe();
            wait_for(
                || async { Ok(!self.eval_bool(&expr).await?) },
                &format!("disappearance of {locator}"),
                options,
            )
            .await
        }

        /// Wait for the first match to be visible and enabled
        pub async fn wait_clickable(
            &self,
            locator: &Locator,
            options: WaitOptions,
        ) -> SuiteResult<()> {
            let expr = locator.clickable_probe();
            wait_for(
                || self.eval_bool(&expr),
                &format!("clickability of {locator}"),
                options,
            )
            .await
        }

        /// Wait for the match at `index` to be visible
        pub async fn wait_nth_displayed(
            &self,
            locator: &Locator,
            index: usize,
            options: WaitOptions,
        ) -> SuiteResult<()> {
            let expr = locator.nth_displayed_probe(index);
            wait_for(
                || self.eval_bool(&expr),
                &format!("visibility of {locator}[{index}]"),
                options,
            )
            .await
        }

        /// Wait for an attribute value to contain `token`
        pub async fn wait_attribute_contains(
            &self,
            locator: &Locator,
            attribute: &str,
            token: &str,
            options: WaitOptions,
        ) -> SuiteResult<()> {
            let expr = locator.attribute_query(attribute);
            wait_for(
                || async {
                    let value: Option<String> = self.eval(&expr).await?;
                    Ok(value.is_some_and(|v| v.contains(token)))
                },
                &format!("{attribute} of {locator} containing '{token}'"),
                options,
            )
            .await
        }

        /// Wait for an attribute value to no longer contain `token`
        pub async fn wait_attribute_lacks(
            &self,
            locator: &Locator,
            attribute: &str,
            token: &str,
            options: WaitOptions,
        ) -> SuiteResult<()> {
            let expr = locator.attribute_query(attribute);
            wait_for(
                || async {
                    let value: Option<String> = self.eval(&expr).await?;
                    Ok(!value.is_some_and(|v| v.contains(token)))
                },
                &format!("{attribute} of {locator} without '{token}'"),
                options,
            )
            .await
        }

        /// Wait for the document to finish loading
        pub async fn wait_document_ready(&self, options: WaitOptions) -> SuiteResult<()> {
            wait_for(
                || self.eval_bool("document.readyState === 'complete'"),
                "document ready",
                options,
            )
            .await
        }

        /// Capture a PNG screenshot of the page
        pub async fn screenshot(&self) -> SuiteResult<Vec<u8>> {
            let page = self.page.lock().await;
            let params = CaptureScreenshotParams::builder()
                .format(CaptureScreenshotFormat::Png)
                .build();

            let shot = page
                .execute(params)
                .await
                .map_err(|e| SuiteError::Screenshot {
                    message: e.to_string(),
                })?;

            use base64::Engine;
            base64::engine::general_purpose::STANDARD
                .decode(&shot.data)
                .map_err(|e| SuiteError::Screenshot {
                    message: e.to_string(),
                })
        }

        /// Tear the session down.
        ///
        /// When `test_failed`, a screenshot keyed by `test_name` is captured
        /// first (best-effort). The browser is closed on every path.
        pub async fn release(self, test_name: &str, test_failed: bool) -> SuiteResult<()> {
            if test_failed {
                let capture = self.screenshot().await;
                persist_failure_screenshot(&self.config.screenshot_dir, test_name, capture);
            }

            let mut browser = self.browser.lock().await;
            browser.close().await.map_err(|e| SuiteError::BrowserLaunch {
                message: e.to_string(),
            })?;
            info!(test = test_name, failed = test_failed, "browser session released");
            Ok(())
        }
    }
}

// ============================================================================
// Scripted implementation (when the `browser` feature is NOT enabled)
// ============================================================================

#[cfg(not(feature = "browser"))]
mod scripted {
    use std::collections::HashMap;
    use std::sync::{Mutex, MutexGuard, PoisonError};

    use tracing::info;

    use super::{persist_failure_screenshot, SessionConfig};
    use crate::error::{SuiteError, SuiteResult};
    use crate::locator::Locator;
    use crate::session::ElementSnapshot;
    use crate::wait::{wait_for, WaitOptions};

    /// PNG signature; stands in for a real capture
    const PNG_STUB: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    /// One scripted element in the in-memory document
    #[derive(Debug, Clone)]
    pub struct MockElement {
        /// Lower-case tag name
        pub tag: String,
        /// Text content
        pub text: String,
        /// Rendered and visible
        pub visible: bool,
        /// Not disabled
        pub enabled: bool,
        /// Current input value
        pub value: String,
        /// Attribute map
        pub attributes: HashMap<String, String>,
    }

    impl MockElement {
        /// A visible, enabled element
        #[must_use]
        pub fn new(tag: impl Into<String>) -> Self {
            Self {
                tag: tag.into(),
                text: String::new(),
                visible: true,
                enabled: true,
                value: String::new(),
                attributes: HashMap::new(),
            }
        }

        /// Set the text content
        #[must_use]
        pub fn with_text(mut self, text: impl Into<String>) -> Self {
            self.text = text.into();
            self
        }

        /// Mark the element hidden
        #[must_use]
        pub const fn hidden(mut self) -> Self {
            self.visible = false;
            self
        }

        /// Mark the element disabled
        #[must_use]
        pub const fn disabled(mut self) -> Self {
            self.enabled = false;
            self
        }

        /// Set an attribute
        #[must_use]
        pub fn with_attribute(
            mut self,
            name: impl Into<String>,
            value: impl Into<String>,
        ) -> Self {
            let _ = self.attributes.insert(name.into(), value.into());
            self
        }
    }

    /// Class token flipped on a target when another element is clicked
    #[derive(Debug, Clone)]
    struct ClassToggle {
        target: String,
        token: String,
    }

    #[derive(Debug, Default)]
    struct MockState {
        url: String,
        back_stack: Vec<String>,
        dom: HashMap<String, Vec<MockElement>>,
        toggles: HashMap<String, ClassToggle>,
        history: Vec<String>,
        closed: bool,
    }

    /// Scripted stand-in for a live browser session.
    ///
    /// Exposes the same async API as the CDP session; element state comes
    /// from `script_*` calls instead of a remote document, and every
    /// interaction is recorded in a call history for assertions.
    #[derive(Debug)]
    pub struct Session {
        config: SessionConfig,
        state: Mutex<MockState>,
    }

    impl Session {
        /// Open a scripted session
        pub async fn acquire(config: SessionConfig) -> SuiteResult<Self> {
            info!(implicit_wait_ms = config.implicit_wait_ms, "scripted session acquired");
            Ok(Self {
                config,
                state: Mutex::new(MockState::default()),
            })
        }

        /// Get the session configuration
        #[must_use]
        pub const fn config(&self) -> &SessionConfig {
            &self.config
        }

        fn state(&self) -> MutexGuard<'_, MockState> {
            self.state.lock().unwrap_or_else(PoisonError::into_inner)
        }

        // ---- scripting surface ------------------------------------------

        /// Script a single element for a locator
        pub fn script_element(&self, locator: &Locator, element: MockElement) {
            self.script_elements(locator, vec![element]);
        }

        /// Script the full match list for a locator
        pub fn script_elements(&self, locator: &Locator, elements: Vec<MockElement>) {
            let _ = self.state().dom.insert(locator.key(), elements);
        }

        /// Remove a locator's matches
        pub fn script_remove(&self, locator: &Locator) {
            let _ = self.state().dom.remove(&locator.key());
        }

        /// Flip `token` inside `target`'s class attribute whenever `clicked`
        /// is clicked
        pub fn script_class_toggle(&self, clicked: &Locator, target: &Locator, token: &str) {
            let _ = self.state().toggles.insert(
                clicked.key(),
                ClassToggle {
                    target: target.key(),
                    token: token.to_string(),
                },
            );
        }

        /// Change the visibility of the match at `index`
        pub fn script_visibility(&self, locator: &Locator, index: usize, visible: bool) {
            if let Some(list) = self.state().dom.get_mut(&locator.key()) {
                if let Some(el) = list.get_mut(index) {
                    el.visible = visible;
                }
            }
        }

        /// Recorded interaction history
        #[must_use]
        pub fn history(&self) -> Vec<String> {
            self.state().history.clone()
        }

        /// Whether an interaction with this prefix was recorded
        #[must_use]
        pub fn was_called(&self, prefix: &str) -> bool {
            self.state().history.iter().any(|h| h.starts_with(prefix))
        }

        // ---- raw reads (no implicit wait) -------------------------------

        fn present(&self, locator: &Locator) -> bool {
            self.state()
                .dom
                .get(&locator.key())
                .is_some_and(|l| !l.is_empty())
        }

        fn first<T>(&self, locator: &Locator, read: impl Fn(&MockElement) -> T) -> Option<T> {
            self.state()
                .dom
                .get(&locator.key())
                .and_then(|l| l.first())
                .map(read)
        }

        async fn wait_present_implicit(&self, locator: &Locator) -> SuiteResult<()> {
            wait_for(
                || async { Ok(self.present(locator)) },
                &format!("presence of {locator}"),
                self.config.implicit_options(),
            )
            .await
        }

        fn apply_toggle(&self, clicked_key: &str) {
            let mut state = self.state();
            let Some(toggle) = state.toggles.get(clicked_key).cloned() else {
                return;
            };
            if let Some(el) = state
                .dom
                .get_mut(&toggle.target)
                .and_then(|l| l.first_mut())
            {
                let class = el.attributes.entry("class".to_string()).or_default();
                if class.contains(&toggle.token) {
                    *class = class
                        .split_whitespace()
                        .filter(|t| *t != toggle.token)
                        .collect::<Vec<_>>()
                        .join(" ");
                } else if class.is_empty() {
                    class.clone_from(&toggle.token);
                } else {
                    class.push(' ');
                    class.push_str(&toggle.token);
                }
            }
        }

        // ---- session API ------------------------------------------------

        /// Navigate to a URL
        pub async fn goto(&self, url: &str) -> SuiteResult<()> {
            let mut state = self.state();
            let previous = std::mem::replace(&mut state.url, url.to_string());
            if !previous.is_empty() {
                state.back_stack.push(previous);
            }
            state.history.push(format!("goto:{url}"));
            Ok(())
        }

        /// Current page URL
        pub async fn current_url(&self) -> SuiteResult<String> {
            Ok(self.state().url.clone())
        }

        /// Navigate back in history
        pub async fn go_back(&self) -> SuiteResult<()> {
            let mut state = self.state();
            if let Some(previous) = state.back_stack.pop() {
                state.url = previous;
            }
            state.history.push("back".to_string());
            Ok(())
        }

        /// Is the first match rendered and visible right now
        pub async fn is_displayed(&self, locator: &Locator) -> SuiteResult<bool> {
            Ok(self.first(locator, |el| el.visible).unwrap_or(false))
        }

        /// Is the match at `index` rendered and visible right now
        pub async fn is_nth_displayed(&self, locator: &Locator, index: usize) -> SuiteResult<bool> {
            Ok(self
                .state()
                .dom
                .get(&locator.key())
                .and_then(|l| l.get(index))
                .is_some_and(|el| el.visible))
        }

        /// Is the first match visible and enabled
        pub async fn is_clickable(&self, locator: &Locator) -> SuiteResult<bool> {
            Ok(self
                .first(locator, |el| el.visible && el.enabled)
                .unwrap_or(false))
        }

        /// Trimmed text content of the first match
        pub async fn text(&self, locator: &Locator) -> SuiteResult<String> {
            self.wait_present_implicit(locator).await?;
            self.first(locator, |el| el.text.trim().to_string())
                .ok_or_else(|| SuiteError::Eval {
                    message: format!("{locator} vanished before read"),
                })
        }

        /// Value property of the first matching input
        pub async fn input_value(&self, locator: &Locator) -> SuiteResult<String> {
            self.wait_present_implicit(locator).await?;
            self.first(locator, |el| el.value.clone())
                .ok_or_else(|| SuiteError::Eval {
                    message: format!("{locator} vanished before read"),
                })
        }

        /// Named attribute of the first match
        pub async fn attribute(
            &self,
            locator: &Locator,
            attribute: &str,
        ) -> SuiteResult<Option<String>> {
            self.wait_present_implicit(locator).await?;
            Ok(self
                .first(locator, |el| el.attributes.get(attribute).cloned())
                .flatten())
        }

        /// Number of current matches (zero is a valid outcome)
        pub async fn count(&self, locator: &Locator) -> SuiteResult<usize> {
            Ok(self
                .state()
                .dom
                .get(&locator.key())
                .map_or(0, Vec::len))
        }

        /// Snapshots of all current matches
        pub async fn elements(&self, locator: &Locator) -> SuiteResult<Vec<ElementSnapshot>> {
            Ok(self
                .state()
                .dom
                .get(&locator.key())
                .map(|l| {
                    l.iter()
                        .map(|el| ElementSnapshot {
                            tag: el.tag.clone(),
                            text: el.text.trim().to_string(),
                            visible: el.visible,
                        })
                        .collect()
                })
                .unwrap_or_default())
        }

        /// Click the first match
        pub async fn click(&self, locator: &Locator) -> SuiteResult<()> {
            self.wait_present_implicit(locator).await?;
            let key = locator.key();
            self.state().history.push(format!("click:{key}"));
            self.apply_toggle(&key);
            Ok(())
        }

        /// Click the match at `index`
        pub async fn click_nth(&self, locator: &Locator, index: usize) -> SuiteResult<()> {
            let key = locator.key();
            let exists = self
                .state()
                .dom
                .get(&key)
                .is_some_and(|l| index < l.len());
            if !exists {
                return Err(SuiteError::Eval {
                    message: format!("{locator}[{index}] vanished before click"),
                });
            }
            self.state().history.push(format!("click:{key}[{index}]"));
            self.apply_toggle(&key);
            Ok(())
        }

        /// Clear the first matching input and type `value`
        pub async fn clear_and_type(&self, locator: &Locator, value: &str) -> SuiteResult<()> {
            self.wait_present_implicit(locator).await?;
            let key = locator.key();
            if let Some(el) = self.state().dom.get_mut(&key).and_then(|l| l.first_mut()) {
                el.value = value.to_string();
            }
            self.state().history.push(format!("fill:{key}:{value}"));
            Ok(())
        }

        /// Wait for the first match to be visible
        pub async fn wait_displayed(
            &self,
            locator: &Locator,
            options: WaitOptions,
        ) -> SuiteResult<()> {
            wait_for(
                || self.is_displayed(locator),
                &format!("visibility of {locator}"),
                options,
            )
            .await
        }

        /// Wait for the first match to be absent or hidden
        pub async fn wait_hidden(&self, locator: &Locator, options: WaitOptions) -> SuiteResult<()> {
            wait_for(
                || async { Ok(!self.is_displayed(locator).await?) },
                &format!("disappearance of {locator}"),
                options,
            )
            .await
        }

        /// Wait for the first match to be visible and enabled
        pub async fn wait_clickable(
            &self,
            locator: &Locator,
            options: WaitOptions,
        ) -> SuiteResult<()> {
            wait_for(
                || self.is_clickable(locator),
                &format!("clickability of {locator}"),
                options,
            )
            .await
        }

        /// Wait for the match at `index` to be visible
        pub async fn wait_nth_displayed(
            &self,
            locator: &Locator,
            index: usize,
            options: WaitOptions,
        ) -> SuiteResult<()> {
            wait_for(
                || self.is_nth_displayed(locator, index),
                &format!("visibility of {locator}[{index}]"),
                options,
            )
            .await
        }

        /// Wait for an attribute value to contain `token`
        pub async fn wait_attribute_contains(
            &self,
            locator: &Locator,
            attribute: &str,
            token: &str,
            options: WaitOptions,
        ) -> SuiteResult<()> {
            wait_for(
                || async {
                    Ok(self
                        .first(locator, |el| el.attributes.get(attribute).cloned())
                        .flatten()
                        .is_some_and(|v| v.contains(token)))
                },
                &format!("{attribute} of {locator} containing '{token}'"),
                options,
            )
            .await
        }

        /// Wait for an attribute value to no longer contain `token`
        pub async fn wait_attribute_lacks(
            &self,
            locator: &Locator,
            attribute: &str,
            token: &str,
            options: WaitOptions,
        ) -> SuiteResult<()> {
            wait_for(
                || async {
                    Ok(!self
                        .first(locator, |el| el.attributes.get(attribute).cloned())
                        .flatten()
                        .is_some_and(|v| v.contains(token)))
                },
                &format!("{attribute} of {locator} without '{token}'"),
                options,
            )
            .await
        }

        /// Wait for the document to finish loading; the scripted document has
        /// no load lifecycle, so it is always ready
        pub async fn wait_document_ready(&self, _options: WaitOptions) -> SuiteResult<()> {
            Ok(())
        }

        /// Capture a (stub) PNG screenshot
        pub async fn screenshot(&self) -> SuiteResult<Vec<u8>> {
            self.state().history.push("screenshot".to_string());
            Ok(PNG_STUB.to_vec())
        }

        /// Tear the session down; see the CDP twin for the contract
        pub async fn release(self, test_name: &str, test_failed: bool) -> SuiteResult<()> {
            if test_failed {
                let capture = self.screenshot().await;
                persist_failure_screenshot(&self.config.screenshot_dir, test_name, capture);
            }
            let mut state = self.state();
            state.closed = true;
            state.history.push("close".to_string());
            info!(test = test_name, failed = test_failed, "scripted session released");
            Ok(())
        }
    }
}

#[cfg(feature = "browser")]
pub use cdp::Session;

#[cfg(not(feature = "browser"))]
pub use scripted::{MockElement, Session};
