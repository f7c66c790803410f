use dioxus::prelude::*;

struct NoticeItem {
    date: &'static str,
    message: &'static str,
}

const NOTICES: &[NoticeItem] = &[
    NoticeItem {
        date: "25 Oct",
        message: "Library will be closed this Friday.",
    },
    NoticeItem {
        date: "25 Oct",
        message: "Lost & Found: Blue backpack at reception.",
    },
    NoticeItem {
        date: "24 Oct",
        message: "Annual Sports registrations open now!",
    },
];

struct ScheduleItem {
    time: &'static str,
    title: &'static str,
    place: &'static str,
}

const SCHEDULE: &[ScheduleItem] = &[
    ScheduleItem {
        time: "09:00",
        title: "Data Structures",
        place: "Room 204",
    },
    ScheduleItem {
        time: "11:00",
        title: "Operating Systems Lab",
        place: "Lab 3",
    },
    ScheduleItem {
        time: "14:00",
        title: "Project Stand-up",
        place: "Online",
    },
];

const FEEDBACK: &[(&str, u8)] = &[
    ("Assignments reviewed", 12),
    ("Pending responses", 3),
    ("Average rating", 4),
];

const HIGHLIGHTS: &[(&str, &str)] = &[
    ("Coding Club", "Hackathon results are out - congratulations to team Phantom!"),
    ("Sports", "Inter-department cricket finals this Saturday."),
    ("Cultural", "Open mic night auditions close Friday."),
];

const FOCUS_TIPS: &[&str] = &[
    "Work in 25 minute blocks and take a 5 minute break.",
    "Silence notifications while working through your task list.",
    "Pick the hardest task first while your energy is high.",
];

#[component]
fn Card(title: &'static str, children: Element) -> Element {
    rsx! {
        div { class: "dashboard-card",
            h2 { class: "dashboard-card-title", "{title}" }
            div { class: "dashboard-card-body", {children} }
        }
    }
}

#[component]
pub fn NoticeBoardCard() -> Element {
    rsx! {
        Card { title: "Notice Board",
            ul { class: "notice-list",
                for (i, notice) in NOTICES.iter().enumerate() {
                    li { key: "{i}", class: "notice-item",
                        span { class: "notice-date", "{notice.date}" }
                        span { class: "notice-message", "{notice.message}" }
                    }
                }
            }
        }
    }
}

#[component]
pub fn ScheduleCard() -> Element {
    rsx! {
        Card { title: "Today's Schedule",
            ul { class: "schedule-list",
                for item in SCHEDULE {
                    li { key: "{item.time}", class: "schedule-item",
                        span { class: "schedule-time", "{item.time}" }
                        span { class: "schedule-title", "{item.title}" }
                        span { class: "text-muted", "{item.place}" }
                    }
                }
            }
        }
    }
}

#[component]
pub fn FeedbackSummaryCard() -> Element {
    rsx! {
        Card { title: "Feedback Summary",
            div { class: "stat-row",
                for (label, value) in FEEDBACK.iter().copied() {
                    div { key: "{label}", class: "stat",
                        span { class: "stat-value", "{value}" }
                        span { class: "stat-label", "{label}" }
                    }
                }
            }
        }
    }
}

#[component]
pub fn SocialHighlightsCard() -> Element {
    rsx! {
        Card { title: "Social Highlights",
            ul { class: "highlight-list",
                for (club, text) in HIGHLIGHTS.iter().copied() {
                    li { key: "{club}",
                        strong { "{club}: " }
                        "{text}"
                    }
                }
            }
        }
    }
}

#[component]
pub fn FocusReminderCard() -> Element {
    rsx! {
        Card { title: "Focus Reminder",
            ul { class: "tip-list",
                for (i, tip) in FOCUS_TIPS.iter().enumerate() {
                    li { key: "{i}", "{tip}" }
                }
            }
        }
    }
}
