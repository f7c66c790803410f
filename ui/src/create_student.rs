use dioxus::prelude::*;
use types::Error;

use crate::use_toaster;

/// Admin dashboard card that opens the create-student form.
#[component]
pub fn CreateStudentCard() -> Element {
    let mut show_form = use_signal(|| false);

    rsx! {
        div { class: "dashboard-card",
            h2 { class: "dashboard-card-title", "Create Student" }
            p { class: "dashboard-card-desc",
                "Add a student account. The student signs in with a temporary password and sets their own."
            }
            button {
                class: "btn btn-primary",
                onclick: move |_| show_form.set(true),
                "New Student"
            }
        }

        if *show_form.read() {
            CreateStudentModal { on_close: move |_| show_form.set(false) }
        }
    }
}

#[component]
fn CreateStudentModal(on_close: EventHandler<()>) -> Element {
    let mut toaster = use_toaster();
    let mut username = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut creating = use_signal(|| false);

    let can_submit = !username.read().trim().is_empty() && !email.read().trim().is_empty();

    rsx! {
        div { class: "modal-overlay",
            onclick: move |_| if !creating() { on_close.call(()) },
            div { class: "modal",
                onclick: move |e| e.stop_propagation(),
                div { class: "modal-header",
                    h2 { class: "modal-title", "Create Student" }
                    button {
                        class: "modal-close",
                        onclick: move |_| on_close.call(()),
                        "×"
                    }
                }
                div { class: "modal-body",
                    div { class: "form-group",
                        label { class: "form-label", r#for: "username", "Username *" }
                        input {
                            id: "username",
                            class: "form-input",
                            r#type: "text",
                            placeholder: "e.g. user12",
                            value: "{username}",
                            oninput: move |e| username.set(e.value()),
                        }
                    }
                    div { class: "form-group",
                        label { class: "form-label", r#for: "email", "Email *" }
                        input {
                            id: "email",
                            class: "form-input",
                            r#type: "email",
                            placeholder: "e.g. student@example.com",
                            value: "{email}",
                            oninput: move |e| email.set(e.value()),
                        }
                    }
                }
                div { class: "modal-footer",
                    button {
                        class: "btn btn-secondary",
                        disabled: creating(),
                        onclick: move |_| on_close.call(()),
                        "Cancel"
                    }
                    button {
                        class: "btn btn-primary",
                        disabled: !can_submit || creating(),
                        onclick: move |_| {
                            let name = username.read().trim().to_string();
                            let mail = email.read().trim().to_string();
                            spawn(async move {
                                creating.set(true);
                                match api::create_student(name, mail).await {
                                    Ok(message) => {
                                        toaster.success(message);
                                        on_close.call(());
                                    }
                                    Err(e) => toaster.error(Error::from_server_error(&e).message),
                                }
                                creating.set(false);
                            });
                        },
                        if creating() { "Creating..." } else { "Create" }
                    }
                }
            }
        }
    }
}
