//! Page objects: intention-revealing operations over the session.
//!
//! One object per application screen. Each operation resolves a fixed
//! locator, applies an explicit wait on a named condition, and returns a
//! primitive result. The objects are stateless per call; they have no
//! identity beyond the session they wrap.

pub mod dashboard;
pub mod login;

pub use dashboard::{DashboardPage, MenuState};
pub use login::LoginPage;
