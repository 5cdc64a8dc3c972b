//! Dashboard page object: header/breadcrumb checks, the side-menu toggle,
//! global search, and the widget catalog with its enumerable actions.

use tracing::debug;

use crate::error::{SuiteError, SuiteResult};
use crate::locator::Locator;
use crate::session::{ElementSnapshot, Session};
use crate::wait::WaitOptions;

/// Menu panel state, tracked through the `toggled` class token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    /// Panel collapsed; `toggled` absent
    Closed,
    /// Panel expanded; `toggled` present
    Open,
}

impl MenuState {
    /// Check if the panel is open
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }
}

/// Class token flipped on the side panel by the toggle button
const MENU_TOGGLED_TOKEN: &str = "toggled";

/// Widget-name → locator table. Static configuration; the only lookup path
/// into the dashboard widgets.
pub const WIDGETS: &[(&str, &str)] = &[
    ("time_at_work", "//p[text()='Time at Work']"),
    ("my_actions", "//p[text()='My Actions']"),
    ("quick_launch", "//p[text()='Quick Launch']"),
    ("buzz_post", "//p[text()='Buzz Latest Posts']"),
    ("leave_today", "//p[text()='Employees on Leave Today']"),
    ("chart_unit", "//p[text()='Employee Distribution by Sub Unit']"),
    ("chart_location", "//p[text()='Employee Distribution by Location']"),
];

/// Resolve a widget name to its locator; unknown names are an
/// invalid-argument failure, never a timeout
pub fn widget_locator(name: &str) -> SuiteResult<Locator> {
    WIDGETS
        .iter()
        .find(|(widget, _)| *widget == name)
        .map(|(_, xpath)| Locator::xpath(*xpath))
        .ok_or_else(|| SuiteError::UnknownWidget {
            name: name.to_string(),
        })
}

/// Fixed locators for the dashboard screen
pub mod locators {
    use crate::locator::Locator;

    /// Dashboard header
    #[must_use]
    pub fn header() -> Locator {
        Locator::xpath("//h6[text()='Dashboard']")
    }

    /// Top-bar brand logo
    #[must_use]
    pub fn brand_logo() -> Locator {
        Locator::class_name("oxd-brand")
    }

    /// Breadcrumb module header
    #[must_use]
    pub fn breadcrumb() -> Locator {
        Locator::css("h6.oxd-topbar-header-breadcrumb-module")
    }

    /// Global search input
    #[must_use]
    pub fn search_input() -> Locator {
        Locator::css("input[placeholder='Search']")
    }

    /// Main menu list, the search results container
    #[must_use]
    pub fn main_menu() -> Locator {
        Locator::xpath("//ul[@class='oxd-main-menu']")
    }

    /// Rows inside the main menu list
    #[must_use]
    pub fn menu_items() -> Locator {
        Locator::css("ul.oxd-main-menu li")
    }

    /// Side panel carrying the `toggled` class token
    #[must_use]
    pub fn side_panel() -> Locator {
        Locator::class_name("oxd-sidepanel")
    }

    /// Menu toggle button
    #[must_use]
    pub fn menu_toggle() -> Locator {
        Locator::class_name("oxd-main-menu-button")
    }

    /// Widget caption paragraphs
    #[must_use]
    pub fn widget_titles() -> Locator {
        Locator::css("p.oxd-text.oxd-text--p")
    }

    /// Quick-launch buttons
    #[must_use]
    pub fn quick_launch_buttons() -> Locator {
        Locator::class_name("orangehrm-quick-launch-icon")
    }

    /// "My Actions" list items
    #[must_use]
    pub fn my_action_items() -> Locator {
        Locator::css(".orangehrm-todo-list-item")
    }

    /// "Time at Work" action buttons
    #[must_use]
    pub fn time_action_buttons() -> Locator {
        Locator::class_name("orangehrm-attendance-card-action")
    }

    /// Punch in/out status text
    #[must_use]
    pub fn punch_status() -> Locator {
        Locator::css(".orangehrm-attendance-card-profile-record .orangehrm-attendance-card-details")
    }

    /// Total elapsed work time text
    #[must_use]
    pub fn total_time() -> Locator {
        Locator::css(".orangehrm-attendance-card-bar .orangehrm-attendance-card-fulltime")
    }

    /// Attendance chart canvases
    #[must_use]
    pub fn chart_canvas() -> Locator {
        Locator::css(".emp-attendance-chart canvas")
    }
}

/// Page object for the dashboard screen
#[derive(Debug)]
pub struct DashboardPage<'a> {
    session: &'a Session,
    wait: WaitOptions,
}

impl<'a> DashboardPage<'a> {
    /// Bind the page object to a session
    #[must_use]
    pub fn new(session: &'a Session) -> Self {
        Self {
            session,
            wait: WaitOptions::read(),
        }
    }

    /// Override the wait budget (hermetic tests use a short one)
    #[must_use]
    pub const fn with_wait(mut self, wait: WaitOptions) -> Self {
        self.wait = wait;
        self
    }

    // ---- basic checks ----------------------------------------------------

    /// Wait until the dashboard header is visible
    pub async fn is_loaded(&self) -> SuiteResult<bool> {
        self.session
            .wait_displayed(&locators::header(), self.wait)
            .await?;
        Ok(true)
    }

    /// Dashboard header text
    pub async fn title(&self) -> SuiteResult<String> {
        let header = locators::header();
        self.session.wait_displayed(&header, self.wait).await?;
        self.session.text(&header).await
    }

    /// Is the brand logo visible
    pub async fn brand_logo_visible(&self) -> SuiteResult<bool> {
        let logo = locators::brand_logo();
        self.session.wait_displayed(&logo, self.wait).await?;
        self.session.is_displayed(&logo).await
    }

    /// Breadcrumb text
    pub async fn breadcrumb_text(&self) -> SuiteResult<String> {
        let breadcrumb = locators::breadcrumb();
        self.session.wait_displayed(&breadcrumb, self.wait).await?;
        self.session.text(&breadcrumb).await
    }

    // ---- menu toggle -----------------------------------------------------

    /// Current menu panel state, read from the `toggled` class token
    pub async fn menu_state(&self) -> SuiteResult<MenuState> {
        let class = self
            .session
            .attribute(&locators::side_panel(), "class")
            .await?;
        Ok(if class.is_some_and(|c| c.contains(MENU_TOGGLED_TOKEN)) {
            MenuState::Open
        } else {
            MenuState::Closed
        })
    }

    /// Activate the toggle button and wait for the class transition to
    /// complete. Returns the state reached.
    pub async fn toggle_menu(&self) -> SuiteResult<MenuState> {
        let panel = locators::side_panel();
        let before = self.menu_state().await?;
        debug!(?before, "toggling side menu");
        self.session.click(&locators::menu_toggle()).await?;
        match before {
            MenuState::Closed => {
                self.session
                    .wait_attribute_contains(&panel, "class", MENU_TOGGLED_TOKEN, self.wait)
                    .await?;
                Ok(MenuState::Open)
            }
            MenuState::Open => {
                self.session
                    .wait_attribute_lacks(&panel, "class", MENU_TOGGLED_TOKEN, self.wait)
                    .await?;
                Ok(MenuState::Closed)
            }
        }
    }

    // ---- search ----------------------------------------------------------

    /// Clear the search box and type `keyword`
    pub async fn search(&self, keyword: &str) -> SuiteResult<()> {
        debug!(keyword, "searching");
        let input = locators::search_input();
        self.session.wait_displayed(&input, self.wait).await?;
        self.session.clear_and_type(&input, keyword).await
    }

    /// Rows currently in the results container; an empty list is a valid
    /// outcome, not an error
    pub async fn search_result_items(&self) -> SuiteResult<Vec<ElementSnapshot>> {
        self.session
            .wait_displayed(&locators::main_menu(), self.wait)
            .await?;
        self.session.elements(&locators::menu_items()).await
    }

    // ---- widgets ---------------------------------------------------------

    /// Wait for the named widget caption to be visible.
    ///
    /// Unknown names fail with invalid-argument before any wait runs.
    pub async fn widget_visible(&self, name: &str) -> SuiteResult<bool> {
        let locator = widget_locator(name)?;
        self.session.wait_displayed(&locator, self.wait).await?;
        self.session.is_displayed(&locator).await
    }

    /// Texts of all widget captions
    pub async fn widget_titles(&self) -> SuiteResult<Vec<String>> {
        let titles = locators::widget_titles();
        self.session.wait_displayed(&titles, self.wait).await?;
        let snapshots = self.session.elements(&titles).await?;
        Ok(snapshots.into_iter().map(|el| el.text).collect())
    }

    // ---- quick launch ----------------------------------------------------

    /// Current quick-launch button handles
    pub async fn quick_launch_elements(&self) -> SuiteResult<Vec<ElementSnapshot>> {
        self.session.elements(&locators::quick_launch_buttons()).await
    }

    /// Click one quick-launch button by index
    pub async fn click_quick_launch(&self, index: usize) -> SuiteResult<()> {
        let buttons = locators::quick_launch_buttons();
        let count = self.session.count(&buttons).await?;
        if index >= count {
            return Err(SuiteError::IndexOutOfRange { index, count });
        }
        self.session.click_nth(&buttons, index).await
    }

    /// Click every currently-displayed quick-launch button
    pub async fn click_all_quick_launch(&self) -> SuiteResult<usize> {
        self.click_all_visible(&locators::quick_launch_buttons()).await
    }

    // ---- time at work ----------------------------------------------------

    /// Current "Time at Work" action button handles
    pub async fn time_button_elements(&self) -> SuiteResult<Vec<ElementSnapshot>> {
        self.session.elements(&locators::time_action_buttons()).await
    }

    /// Click every currently-displayed "Time at Work" action button
    pub async fn click_all_time_buttons(&self) -> SuiteResult<usize> {
        self.click_all_visible(&locators::time_action_buttons()).await
    }

    /// Punch in/out status text
    pub async fn punch_status_text(&self) -> SuiteResult<String> {
        self.session.text(&locators::punch_status()).await
    }

    /// Total elapsed work time text
    pub async fn total_time_text(&self) -> SuiteResult<String> {
        self.session.text(&locators::total_time()).await
    }

    /// Number of rendered attendance chart canvases
    pub async fn chart_canvas_count(&self) -> SuiteResult<usize> {
        self.session.count(&locators::chart_canvas()).await
    }

    // ---- my actions ------------------------------------------------------

    /// Current "My Actions" item handles
    pub async fn my_action_elements(&self) -> SuiteResult<Vec<ElementSnapshot>> {
        self.session.elements(&locators::my_action_items()).await
    }

    /// Click every currently-displayed "My Actions" item
    pub async fn click_all_my_actions(&self) -> SuiteResult<usize> {
        self.click_all_visible(&locators::my_action_items()).await
    }

    // ---- generic click helper --------------------------------------------

    /// Click every currently-displayed element matching `locator`.
    ///
    /// Visibility is re-verified immediately before each click, and the
    /// element must still be displayed after the click before iteration
    /// continues (guards against elements going stale mid-iteration).
    /// Returns the count actually clicked; hidden elements are skipped,
    /// never clicked.
    pub async fn click_all_visible(&self, locator: &Locator) -> SuiteResult<usize> {
        let total = self.session.count(locator).await?;
        let mut clicked = 0;
        for index in 0..total {
            if !self.session.is_nth_displayed(locator, index).await? {
                continue;
            }
            self.session.click_nth(locator, index).await?;
            self.session
                .wait_nth_displayed(locator, index, self.wait)
                .await?;
            clicked += 1;
        }
        Ok(clicked)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod widget_table_tests {
        use super::*;

        #[test]
        fn test_every_known_name_resolves() {
            for (name, _) in WIDGETS {
                let locator = widget_locator(name).unwrap();
                assert!(locator.value().contains("//p[text()="));
            }
        }

        #[test]
        fn test_unknown_name_is_invalid_argument_not_timeout() {
            let err = widget_locator("payroll").unwrap_err();
            assert!(matches!(err, SuiteError::UnknownWidget { ref name } if name == "payroll"));
            assert!(!err.is_timeout());
        }

        #[test]
        fn test_table_has_seven_unique_names() {
            let names: std::collections::HashSet<&str> =
                WIDGETS.iter().map(|(name, _)| *name).collect();
            assert_eq!(names.len(), 7);
        }
    }

    #[cfg(not(feature = "browser"))]
    mod behavior_tests {
        use super::*;
        use crate::session::{MockElement, Session, SessionConfig};

        fn fast() -> WaitOptions {
            WaitOptions::new().with_timeout(60).with_poll_interval(5)
        }

        async fn scripted_dashboard_session() -> Session {
            let session = Session::acquire(SessionConfig::default().with_implicit_wait(40))
                .await
                .unwrap();
            session.script_element(
                &locators::header(),
                MockElement::new("h6").with_text("Dashboard"),
            );
            session.script_element(&locators::brand_logo(), MockElement::new("div"));
            session.script_element(
                &locators::breadcrumb(),
                MockElement::new("h6").with_text("Dashboard"),
            );
            session.script_element(
                &locators::side_panel(),
                MockElement::new("aside").with_attribute("class", "oxd-sidepanel"),
            );
            session.script_element(&locators::menu_toggle(), MockElement::new("button"));
            session.script_class_toggle(
                &locators::menu_toggle(),
                &locators::side_panel(),
                "toggled",
            );
            session
        }

        #[tokio::test]
        async fn test_basic_checks() {
            let session = scripted_dashboard_session().await;
            let page = DashboardPage::new(&session).with_wait(fast());

            assert!(page.is_loaded().await.unwrap());
            assert_eq!(page.title().await.unwrap(), "Dashboard");
            assert!(page.brand_logo_visible().await.unwrap());
            assert_eq!(page.breadcrumb_text().await.unwrap(), "Dashboard");
        }

        #[tokio::test]
        async fn test_menu_toggle_round_trip_restores_initial_state() {
            let session = scripted_dashboard_session().await;
            let page = DashboardPage::new(&session).with_wait(fast());

            assert_eq!(page.menu_state().await.unwrap(), MenuState::Closed);
            assert_eq!(page.toggle_menu().await.unwrap(), MenuState::Open);
            assert!(page.menu_state().await.unwrap().is_open());
            assert_eq!(page.toggle_menu().await.unwrap(), MenuState::Closed);
            assert_eq!(page.menu_state().await.unwrap(), MenuState::Closed);
        }

        #[tokio::test]
        async fn test_search_fills_input_and_counts_rows() {
            let session = scripted_dashboard_session().await;
            session.script_element(&locators::search_input(), MockElement::new("input"));
            session.script_element(&locators::main_menu(), MockElement::new("ul"));
            session.script_elements(
                &locators::menu_items(),
                vec![
                    MockElement::new("li").with_text("Admin"),
                    MockElement::new("li").with_text("Maintenance"),
                ],
            );
            let page = DashboardPage::new(&session).with_wait(fast());

            page.search("admin").await.unwrap();
            assert!(session.was_called("fill:css=input[placeholder='Search']:admin"));
            let items = page.search_result_items().await.unwrap();
            assert_eq!(items.len(), 2);
        }

        #[tokio::test]
        async fn test_search_with_no_matches_yields_empty_list() {
            let session = scripted_dashboard_session().await;
            session.script_element(&locators::search_input(), MockElement::new("input"));
            session.script_element(&locators::main_menu(), MockElement::new("ul"));
            session.script_elements(&locators::menu_items(), vec![]);
            let page = DashboardPage::new(&session).with_wait(fast());

            page.search("zzz123").await.unwrap();
            assert!(page.search_result_items().await.unwrap().is_empty());
        }

        #[tokio::test]
        async fn test_widget_visible_for_scripted_widget() {
            let session = scripted_dashboard_session().await;
            session.script_element(
                &widget_locator("quick_launch").unwrap(),
                MockElement::new("p").with_text("Quick Launch"),
            );
            let page = DashboardPage::new(&session).with_wait(fast());

            assert!(page.widget_visible("quick_launch").await.unwrap());
        }

        #[tokio::test]
        async fn test_widget_visible_unknown_name_fails_fast() {
            let session = scripted_dashboard_session().await;
            let page = DashboardPage::new(&session).with_wait(fast());

            let err = page.widget_visible("payroll").await.unwrap_err();
            assert!(matches!(err, SuiteError::UnknownWidget { .. }));
        }

        #[tokio::test]
        async fn test_click_all_skips_hidden_elements() {
            let session = scripted_dashboard_session().await;
            let buttons = locators::quick_launch_buttons();
            session.script_elements(
                &buttons,
                vec![
                    MockElement::new("button"),
                    MockElement::new("button").hidden(),
                    MockElement::new("button"),
                    MockElement::new("button").hidden(),
                    MockElement::new("button"),
                ],
            );
            let page = DashboardPage::new(&session).with_wait(fast());

            let clicked = page.click_all_quick_launch().await.unwrap();
            assert_eq!(clicked, 3);

            let history = session.history();
            let clicks: Vec<&String> =
                history.iter().filter(|h| h.starts_with("click:")).collect();
            assert_eq!(clicks.len(), 3);
            assert!(!session.was_called("click:class=orangehrm-quick-launch-icon[1]"));
            assert!(!session.was_called("click:class=orangehrm-quick-launch-icon[3]"));
        }

        #[tokio::test]
        async fn test_click_all_counts_every_visible_element() {
            let session = scripted_dashboard_session().await;
            let items = locators::my_action_items();
            session.script_elements(
                &items,
                vec![
                    MockElement::new("div").with_text("Review leave"),
                    MockElement::new("div").with_text("Approve timesheet"),
                ],
            );
            let page = DashboardPage::new(&session).with_wait(fast());

            assert_eq!(page.click_all_my_actions().await.unwrap(), 2);
        }

        #[tokio::test]
        async fn test_click_quick_launch_bounds_check() {
            let session = scripted_dashboard_session().await;
            session.script_elements(
                &locators::quick_launch_buttons(),
                vec![MockElement::new("button"); 2],
            );
            let page = DashboardPage::new(&session).with_wait(fast());

            assert!(page.click_quick_launch(1).await.is_ok());
            let err = page.click_quick_launch(2).await.unwrap_err();
            assert!(
                matches!(err, SuiteError::IndexOutOfRange { index: 2, count: 2 })
            );
        }

        #[tokio::test]
        async fn test_attendance_widgets() {
            let session = scripted_dashboard_session().await;
            session.script_element(
                &locators::punch_status(),
                MockElement::new("div").with_text("Punched Out"),
            );
            session.script_element(
                &locators::total_time(),
                MockElement::new("div").with_text(" 0h 00m "),
            );
            session.script_element(&locators::chart_canvas(), MockElement::new("canvas"));
            let page = DashboardPage::new(&session).with_wait(fast());

            assert_eq!(page.punch_status_text().await.unwrap(), "Punched Out");
            assert_eq!(page.total_time_text().await.unwrap(), "0h 00m");
            assert!(page.chart_canvas_count().await.unwrap() >= 1);
        }

        #[tokio::test]
        async fn test_widget_titles_collects_caption_texts() {
            let session = scripted_dashboard_session().await;
            session.script_elements(
                &locators::widget_titles(),
                vec![
                    MockElement::new("p").with_text("Time at Work"),
                    MockElement::new("p").with_text("My Actions"),
                    MockElement::new("p").with_text("Quick Launch"),
                ],
            );
            let page = DashboardPage::new(&session).with_wait(fast());

            let titles = page.widget_titles().await.unwrap();
            assert_eq!(titles, vec!["Time at Work", "My Actions", "Quick Launch"]);
        }
    }
}
