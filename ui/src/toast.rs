use dioxus::prelude::*;
use types::{Notice, NoticeKind};

const MAX_TOASTS: usize = 4;

#[derive(Clone, Debug, PartialEq)]
struct Toast {
    id: u64,
    notice: Notice,
}

/// Page-wide notification queue - use `use_toaster()` to access.
#[derive(Clone, Copy)]
pub struct Toaster {
    toasts: Signal<Vec<Toast>>,
    next_id: Signal<u64>,
}

impl Toaster {
    pub fn show(&mut self, notice: Notice) {
        let id = *self.next_id.peek();
        self.next_id.set(id + 1);

        let mut toasts = self.toasts.write();
        toasts.push(Toast { id, notice });
        if toasts.len() > MAX_TOASTS {
            toasts.remove(0);
        }
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.show(Notice::success(message));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.show(Notice::error(message));
    }

    pub fn dismiss(&mut self, id: u64) {
        self.toasts.write().retain(|t| t.id != id);
    }
}

/// Install the toaster for everything below the calling component.
pub fn use_toaster_provider() -> Toaster {
    use_context_provider(|| Toaster {
        toasts: Signal::new(Vec::new()),
        next_id: Signal::new(0),
    })
}

pub fn use_toaster() -> Toaster {
    use_context::<Toaster>()
}

#[component]
pub fn ToastHost() -> Element {
    let mut toaster = use_toaster();
    let toasts = toaster.toasts.read().clone();

    rsx! {
        div { class: "toast-stack",
            for toast in toasts {
                {
                    let id = toast.id;
                    let class = match toast.notice.kind {
                        NoticeKind::Success => "toast toast-success",
                        NoticeKind::Error => "toast toast-error",
                    };
                    rsx! {
                        div { key: "{id}", class,
                            span { class: "toast-message", "{toast.notice.message}" }
                            button {
                                class: "toast-close",
                                onclick: move |_| toaster.dismiss(id),
                                "×"
                            }
                        }
                    }
                }
            }
        }
    }
}
