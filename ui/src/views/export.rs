use dioxus::prelude::*;

use crate::report::ExportPanel;

#[component]
pub fn Export() -> Element {
    rsx! {
        main { class: "page page-export",
            ExportPanel {}
        }
    }
}
