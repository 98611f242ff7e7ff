//! Shared UI crate for Tag Validator: payload model, dashboard widgets,
//! report exports and the views both shells route to.

pub mod core;
pub mod dashboard;
pub mod i18n;
pub mod report;
pub mod views;

pub mod components {
    // Localized application navbar (components/app_navbar.rs)
    pub mod app_navbar;
    pub use app_navbar::register_nav;
    pub use app_navbar::AppNavbar;
    pub use app_navbar::NavBuilder;
}

/// Shared theme. Inlined by the shells and by exported HTML snapshots.
pub const THEME_CSS: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/theme/main.css"));

#[cfg(test)]
mod tests;
