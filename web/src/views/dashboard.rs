use crate::{Route, use_current_user};
use dioxus::prelude::*;
use ui::{
    CreateStudentCard, FeedbackSummaryCard, FocusReminderCard, NoticeBoardCard, ScheduleCard,
    SocialHighlightsCard,
};

#[component]
pub fn Dashboard() -> Element {
    let user = use_current_user();
    let is_admin = user.read().as_ref().is_some_and(|u| u.is_admin());
    let greeting = match user.read().as_ref() {
        Some(u) => format!("Welcome back, {}.", u.username),
        None => "Welcome to PhanTask.".to_string(),
    };

    rsx! {
        div {
            div { class: "page-header",
                h1 { class: "page-title", "Dashboard" }
                p { class: "page-subtitle", "{greeting}" }
            }
            if is_admin {
                AdminDashboard {}
            } else {
                UserDashboard {}
            }
        }
    }
}

#[component]
fn AdminDashboard() -> Element {
    rsx! {
        div { class: "dashboard-grid",
            CreateStudentCard {}
            Link {
                to: Route::users(),
                class: "dashboard-card",
                h3 { class: "dashboard-card-title", "Manage Users" }
                p { class: "dashboard-card-desc",
                    "Search the active roster and deactivate accounts that should no longer sign in."
                }
            }
            NoticeBoardCard {}
            FocusReminderCard {}
        }
    }
}

#[component]
fn UserDashboard() -> Element {
    rsx! {
        div { class: "dashboard-grid",
            ScheduleCard {}
            FeedbackSummaryCard {}
            NoticeBoardCard {}
            SocialHighlightsCard {}
            FocusReminderCard {}
        }
    }
}
