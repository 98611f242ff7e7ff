use crate::t;
use dioxus::prelude::*;
use once_cell::sync::OnceCell;

/// Platform-supplied navigation links.
///
/// `ui` cannot name the platform's `Route` enum, so each shell registers a
/// builder whose closures return a fully constructed `Link` containing the
/// localized label they are given:
///
/// ```ignore
/// use ui::components::app_navbar::{register_nav, NavBuilder};
/// register_nav(NavBuilder {
///     overview: |label| rsx!( Link { class: "navbar__link", to: Route::Overview {}, "{label}" } ),
///     export: |label| rsx!( Link { class: "navbar__link", to: Route::Export {}, "{label}" } ),
/// });
/// ```
///
/// Without a registered builder the navbar falls back to its `children`.
pub struct NavBuilder {
    pub overview: fn(label: &str) -> Element,
    pub export: fn(label: &str) -> Element,
}

static NAV_BUILDER: OnceCell<NavBuilder> = OnceCell::new();

/// First registration wins.
pub fn register_nav(builder: NavBuilder) {
    if NAV_BUILDER.set(builder).is_err() {
        tracing::debug!("navigation builder already registered");
    }
}

#[component]
pub fn AppNavbar(children: Element) -> Element {
    let tagline = t!("tagline");

    rsx! {
        header { id: "navbar", class: "navbar",
            div { class: "navbar__brand",
                span { class: "navbar__title",
                    i { class: "fas fa-tags" }
                    " Tag Validator"
                }
                span { class: "navbar__tagline", "{tagline}" }
            }

            nav { class: "navbar__links",
                if let Some(builder) = NAV_BUILDER.get() {
                    {(builder.overview)(&t!("nav-overview"))}
                    {(builder.export)(&t!("nav-export"))}
                } else {
                    {children}
                }
            }
        }
    }
}
