use dioxus::prelude::*;

/// The editable profile fields.
#[component]
pub fn ProfileForm(
    full_name: Signal<String>,
    department: Signal<String>,
    phone: Signal<String>,
    year_of_study: Signal<String>,
) -> Element {
    rsx! {
        div { class: "form-group",
            label { class: "form-label", r#for: "full_name", "Full Name" }
            input {
                id: "full_name",
                class: "form-input",
                r#type: "text",
                placeholder: "e.g. Jane Doe",
                value: "{full_name}",
                oninput: move |e| full_name.set(e.value()),
            }
        }
        div { class: "form-group",
            label { class: "form-label", r#for: "department", "Department" }
            input {
                id: "department",
                class: "form-input",
                r#type: "text",
                placeholder: "e.g. Computer Science",
                value: "{department}",
                oninput: move |e| department.set(e.value()),
            }
        }
        div { class: "form-group",
            label { class: "form-label", r#for: "phone", "Phone" }
            input {
                id: "phone",
                class: "form-input",
                r#type: "tel",
                placeholder: "e.g. 9876543210",
                value: "{phone}",
                oninput: move |e| phone.set(e.value()),
            }
        }
        div { class: "form-group",
            label { class: "form-label", r#for: "year_of_study", "Year of Study" }
            input {
                id: "year_of_study",
                class: "form-input",
                r#type: "text",
                placeholder: "e.g. 3",
                value: "{year_of_study}",
                oninput: move |e| year_of_study.set(e.value()),
            }
        }
    }
}

#[component]
pub fn DetailRow(label: &'static str, value: Option<String>) -> Element {
    rsx! {
        div { class: "detail-row",
            span { class: "detail-label", "{label}" }
            match value.filter(|v| !v.trim().is_empty()) {
                Some(value) => rsx! { span { class: "detail-value", "{value}" } },
                None => rsx! { span { class: "detail-value text-muted", "Not set" } },
            }
        }
    }
}
