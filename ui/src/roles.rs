use dioxus::prelude::*;
use types::role_tags;

/// Role pills for a table cell; an empty list shows a single "N/A" pill.
#[component]
pub fn RoleTags(roles: Vec<String>) -> Element {
    rsx! {
        div { class: "role-tags",
            for role in role_tags(&roles) {
                span { key: "{role}", class: "role-tag", "{role}" }
            }
        }
    }
}
