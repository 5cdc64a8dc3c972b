//! Locator model: immutable (strategy, value) pairs and their compilation
//! into DOM query JavaScript.
//!
//! Locators are static configuration, not runtime state. The page objects
//! hold fixed locator tables; the session compiles a locator into a query or
//! probe expression and evaluates it in the page. Compilation is pure string
//! work, so the whole catalog is unit-testable without a browser.

use serde::{Deserialize, Serialize};

/// Element lookup strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    /// CSS selector (e.g. `div.orangehrm-login-branding img`)
    Css,
    /// `name` attribute lookup
    Name,
    /// Single class-name lookup
    ClassName,
    /// XPath expression
    XPath,
    /// Visible text content
    Text,
}

impl Strategy {
    /// Short tag used in keys and wait descriptions
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Css => "css",
            Self::Name => "name",
            Self::ClassName => "class",
            Self::XPath => "xpath",
            Self::Text => "text",
        }
    }
}

/// An immutable (strategy, value) pair identifying zero or more elements in
/// the remote document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locator {
    strategy: Strategy,
    value: String,
}

impl std::fmt::Display for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.strategy.as_str(), self.value)
    }
}

impl Locator {
    /// Create a locator with an explicit strategy
    #[must_use]
    pub fn new(strategy: Strategy, value: impl Into<String>) -> Self {
        Self {
            strategy,
            value: value.into(),
        }
    }

    /// CSS selector locator
    #[must_use]
    pub fn css(value: impl Into<String>) -> Self {
        Self::new(Strategy::Css, value)
    }

    /// `name` attribute locator
    #[must_use]
    pub fn name(value: impl Into<String>) -> Self {
        Self::new(Strategy::Name, value)
    }

    /// Class-name locator
    #[must_use]
    pub fn class_name(value: impl Into<String>) -> Self {
        Self::new(Strategy::ClassName, value)
    }

    /// XPath locator
    #[must_use]
    pub fn xpath(value: impl Into<String>) -> Self {
        Self::new(Strategy::XPath, value)
    }

    /// Visible-text locator
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::new(Strategy::Text, value)
    }

    /// Get the strategy
    #[must_use]
    pub const fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Get the raw value
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Stable key for this locator (mock DOM addressing, log labels)
    #[must_use]
    pub fn key(&self) -> String {
        self.to_string()
    }

    /// Normalized query base; Name and `ClassName` reduce to CSS
    fn base(&self) -> QueryBase {
        match self.strategy {
            Strategy::Css => QueryBase::Css(self.value.clone()),
            Strategy::Name => QueryBase::Css(format!("[name=\"{}\"]", self.value)),
            Strategy::ClassName => QueryBase::Css(format!(".{}", self.value)),
            Strategy::XPath => QueryBase::XPath(self.value.clone()),
            Strategy::Text => QueryBase::Text(self.value.clone()),
        }
    }

    /// Expression evaluating to the first matching element, or null
    #[must_use]
    pub fn element_query(&self) -> String {
        match self.base() {
            QueryBase::Css(css) => format!("document.querySelector({css:?})"),
            QueryBase::XPath(xp) => format!(
                "document.evaluate({xp:?}, document, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue"
            ),
            QueryBase::Text(t) => format!(
                "Array.from(document.querySelectorAll('*')).find(el => el.textContent.includes({t:?}))"
            ),
        }
    }

    /// Expression evaluating to the array of all matching elements
    #[must_use]
    pub fn all_query(&self) -> String {
        match self.base() {
            QueryBase::Css(css) => format!("Array.from(document.querySelectorAll({css:?}))"),
            QueryBase::XPath(xp) => format!(
                "(() => {{ const r = document.evaluate({xp:?}, document, null, XPathResult.ORDERED_NODE_SNAPSHOT_TYPE, null); const out = []; for (let i = 0; i < r.snapshotLength; i++) out.push(r.snapshotItem(i)); return out; }})()"
            ),
            QueryBase::Text(t) => format!(
                "Array.from(document.querySelectorAll('*')).filter(el => el.textContent.includes({t:?}))"
            ),
        }
    }

    /// Expression evaluating to the number of matching elements
    #[must_use]
    pub fn count_query(&self) -> String {
        format!("({}).length", self.all_query())
    }

    /// Probe: is the first matching element rendered and visible
    #[must_use]
    pub fn displayed_probe(&self) -> String {
        Self::wrap_displayed(&self.element_query())
    }

    /// Probe: is the element at `index` in the match list rendered and visible
    #[must_use]
    pub fn nth_displayed_probe(&self, index: usize) -> String {
        Self::wrap_displayed(&format!("({})[{index}]", self.all_query()))
    }

    /// Probe: is the first matching element visible and not disabled
    #[must_use]
    pub fn clickable_probe(&self) -> String {
        format!(
            "(() => {{ const el = {}; if (!el) return false; {} return vis && !el.disabled; }})()",
            self.element_query(),
            VISIBILITY_CHECK
        )
    }

    /// Expression evaluating to the trimmed text content, or null
    #[must_use]
    pub fn text_query(&self) -> String {
        format!(
            "(() => {{ const el = {}; return el ? el.textContent.trim() : null; }})()",
            self.element_query()
        )
    }

    /// Expression evaluating to the input's value property, or null
    #[must_use]
    pub fn value_query(&self) -> String {
        format!(
            "(() => {{ const el = {}; return el ? el.value : null; }})()",
            self.element_query()
        )
    }

    /// Expression evaluating to the named attribute's value, or null
    #[must_use]
    pub fn attribute_query(&self, attribute: &str) -> String {
        format!(
            "(() => {{ const el = {}; return el ? el.getAttribute({attribute:?}) : null; }})()",
            self.element_query()
        )
    }

    /// Script clicking the first matching element; yields false when absent
    #[must_use]
    pub fn click_script(&self) -> String {
        format!(
            "(() => {{ const el = {}; if (!el) return false; el.click(); return true; }})()",
            self.element_query()
        )
    }

    /// Script clicking the element at `index`; yields false when absent
    #[must_use]
    pub fn click_nth_script(&self, index: usize) -> String {
        format!(
            "(() => {{ const el = ({})[{index}]; if (!el) return false; el.click(); return true; }})()",
            self.all_query()
        )
    }

    /// Script clearing the first matching input and typing `value` into it
    #[must_use]
    pub fn fill_script(&self, value: &str) -> String {
        format!(
            "(() => {{ const el = {}; if (!el) return false; el.focus(); el.value = ''; el.value = {value:?}; el.dispatchEvent(new Event('input', {{ bubbles: true }})); el.dispatchEvent(new Event('change', {{ bubbles: true }})); return true; }})()",
            self.element_query()
        )
    }

    /// Expression evaluating to `[{tag, text, visible}]` snapshots of all matches
    #[must_use]
    pub fn snapshot_query(&self) -> String {
        format!(
            "({}).map(el => {{ {} return {{ tag: el.tagName.toLowerCase(), text: el.textContent.trim(), visible: vis }}; }})",
            self.all_query(),
            VISIBILITY_CHECK
        )
    }

    fn wrap_displayed(element_expr: &str) -> String {
        format!("(() => {{ const el = {element_expr}; if (!el) return false; {VISIBILITY_CHECK} return vis; }})()")
    }
}

/// Normalized form a locator compiles through
enum QueryBase {
    Css(String),
    XPath(String),
    Text(String),
}

/// Shared visibility check fragment; binds `vis` from an in-scope `el`
const VISIBILITY_CHECK: &str = "const r = el.getBoundingClientRect(); const s = window.getComputedStyle(el); const vis = r.width > 0 && r.height > 0 && s.display !== 'none' && s.visibility !== 'hidden';";

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod query_tests {
        use super::*;

        #[test]
        fn test_css_element_query() {
            let q = Locator::css("div.orangehrm-login-branding img").element_query();
            assert!(q.contains("querySelector"));
            assert!(q.contains("orangehrm-login-branding"));
        }

        #[test]
        fn test_name_normalizes_to_attribute_selector() {
            let q = Locator::name("username").element_query();
            assert!(q.contains("[name=\\\"username\\\"]"));
        }

        #[test]
        fn test_class_name_normalizes_to_dot_selector() {
            let q = Locator::class_name("oxd-sidepanel").element_query();
            assert!(q.contains(".oxd-sidepanel"));
        }

        #[test]
        fn test_xpath_element_query() {
            let q = Locator::xpath("//button[@type='submit']").element_query();
            assert!(q.contains("document.evaluate"));
            assert!(q.contains("FIRST_ORDERED_NODE_TYPE"));
        }

        #[test]
        fn test_text_element_query() {
            let q = Locator::text("Forgot your password?").element_query();
            assert!(q.contains("textContent.includes"));
            assert!(q.contains("Forgot your password?"));
        }

        #[test]
        fn test_xpath_all_query_uses_snapshot() {
            let q = Locator::xpath("//li").all_query();
            assert!(q.contains("ORDERED_NODE_SNAPSHOT_TYPE"));
            assert!(q.contains("snapshotLength"));
        }

        #[test]
        fn test_count_query_appends_length() {
            let q = Locator::css("li").count_query();
            assert!(q.ends_with(".length"));
            assert!(q.contains("querySelectorAll"));
        }
    }

    mod probe_tests {
        use super::*;

        #[test]
        fn test_displayed_probe_checks_geometry_and_style() {
            let p = Locator::name("password").displayed_probe();
            assert!(p.contains("getBoundingClientRect"));
            assert!(p.contains("getComputedStyle"));
            assert!(p.contains("visibility"));
        }

        #[test]
        fn test_nth_displayed_probe_indexes_match_list() {
            let p = Locator::class_name("orangehrm-quick-launch-icon").nth_displayed_probe(3);
            assert!(p.contains("[3]"));
            assert!(p.contains("querySelectorAll"));
        }

        #[test]
        fn test_clickable_probe_rejects_disabled() {
            let p = Locator::xpath("//button[@type='submit']").clickable_probe();
            assert!(p.contains("!el.disabled"));
        }
    }

    mod script_tests {
        use super::*;

        #[test]
        fn test_click_script_guards_missing_element() {
            let s = Locator::css("button").click_script();
            assert!(s.contains("if (!el) return false"));
            assert!(s.contains("el.click()"));
        }

        #[test]
        fn test_fill_script_clears_then_dispatches_input() {
            let s = Locator::name("username").fill_script("Admin");
            assert!(s.contains("el.value = ''"));
            assert!(s.contains("\"Admin\""));
            assert!(s.contains("new Event('input'"));
        }

        #[test]
        fn test_fill_script_escapes_quotes() {
            let s = Locator::name("username").fill_script("a\"b");
            assert!(s.contains("\\\"b\""));
        }

        #[test]
        fn test_snapshot_query_shape() {
            let s = Locator::css(".orangehrm-todo-list-item").snapshot_query();
            assert!(s.contains("tagName.toLowerCase()"));
            assert!(s.contains("visible: vis"));
        }
    }

    mod identity_tests {
        use super::*;

        #[test]
        fn test_key_is_strategy_prefixed() {
            assert_eq!(Locator::name("username").key(), "name=username");
            assert_eq!(Locator::css("canvas").key(), "css=canvas");
        }

        #[test]
        fn test_locator_round_trips_through_serde() {
            let loc = Locator::xpath("//h6[text()='Dashboard']");
            let json = serde_json::to_string(&loc).unwrap();
            let back: Locator = serde_json::from_str(&json).unwrap();
            assert_eq!(back, loc);
        }

        #[test]
        fn test_accessors() {
            let loc = Locator::class_name("oxd-brand");
            assert_eq!(loc.strategy(), Strategy::ClassName);
            assert_eq!(loc.value(), "oxd-brand");
        }
    }
}
