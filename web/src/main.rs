use dioxus::prelude::*;

use ui::components::app_navbar::{register_nav, NavBuilder};
use ui::components::AppNavbar;
use ui::dashboard::use_dashboard_provider;
use ui::report::html::{CHART_JS_CDN, FONT_AWESOME_CDN, POPPINS_CSS};
use ui::views::{Export, Overview};
use ui::THEME_CSS;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(WebNavbar)]
    #[route("/")]
    Overview {},
    #[route("/exportar")]
    Export {},
}

fn nav_overview(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Overview {},
        "{label}"
    })
}
fn nav_export(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Export {},
        "{label}"
    })
}

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    {
        ui::i18n::init();
        register_nav(NavBuilder {
            overview: nav_overview,
            export: nav_export,
        });
    }
    // Reads the payload the host page left on `window`.
    use_dashboard_provider();

    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: FONT_AWESOME_CDN }
        document::Link { rel: "stylesheet", href: POPPINS_CSS }
        document::Script { src: CHART_JS_CDN }
        document::Style { "{THEME_CSS}" }

        Router::<Route> {}
    }
}

/// A web-specific Router around the shared `AppNavbar` component
/// which allows us to use the web-specific `Route` enum.
#[component]
fn WebNavbar() -> Element {
    rsx! {
        AppNavbar { }
        Outlet::<Route> {}
    }
}
