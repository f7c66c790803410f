use dioxus::prelude::*;
use types::{Error, Profile as ProfileData, ProfileUpdate};
use ui::{RoleTags, use_toaster};

use super::components::{DetailRow, ProfileForm};
use crate::{Route, redirect_if_signed_out, use_current_user};

const UPDATE_SUCCESS: &str = "Profile updated successfully!";
const UPDATE_FAILED: &str = "Failed to update profile. Please try again.";

#[component]
pub fn Profile() -> Element {
    let profile = use_resource(api::get_profile);
    let user = use_current_user();
    let roles = user
        .read()
        .as_ref()
        .map(|u| u.roles.clone())
        .unwrap_or_default();
    let primary_role = user.read().as_ref().map(|u| u.primary_role().to_string());

    let body = match &*profile.read() {
        None => rsx! { div { class: "loading", "Loading profile..." } },
        Some(Err(e)) => {
            let error = Error::from_server_error(e);
            if !redirect_if_signed_out(&error) {
                tracing::warn!(%error, "failed to load profile");
            }
            rsx! { div { class: "empty-state", "Could not load your profile: {error}" } }
        }
        Some(Ok(p)) => {
            let p = p.clone();
            let initial = p
                .full_name
                .as_deref()
                .or(p.username.as_deref())
                .and_then(|name| name.chars().next())
                .unwrap_or('?')
                .to_uppercase()
                .to_string();

            rsx! {
                div { class: "card profile-card",
                    div { class: "profile-heading",
                        match p.photo_url.clone() {
                            Some(src) => rsx! { img { class: "profile-photo", src, alt: "Profile photo" } },
                            None => rsx! { div { class: "profile-photo profile-initial", "{initial}" } },
                        }
                        div {
                            h2 { class: "profile-name", {p.full_name.clone().or(p.username.clone()).unwrap_or_default()} }
                            if let Some(username) = p.username.clone() {
                                p { class: "text-muted", "@{username}" }
                            }
                        }
                    }
                    DetailRow { label: "Email", value: p.email.clone() }
                    DetailRow { label: "Primary Role", value: primary_role.clone() }
                    div { class: "detail-row",
                        span { class: "detail-label", "Roles" }
                        RoleTags { roles: roles.clone() }
                    }
                    DetailRow { label: "Department", value: p.department.clone() }
                    DetailRow { label: "Phone", value: p.phone.clone() }
                    DetailRow { label: "Year of Study", value: p.year_of_study.clone() }
                }
            }
        }
    };

    rsx! {
        div {
            div { class: "page-header",
                div { class: "page-header-content",
                    h1 { class: "page-title", "Profile" }
                    p { class: "page-subtitle", "Your account details." }
                }
                div { class: "page-header-actions",
                    Link { to: Route::EditProfile {}, class: "btn btn-primary", "Edit Profile" }
                }
            }
            {body}
        }
    }
}

#[component]
pub fn EditProfile() -> Element {
    let profile = use_resource(api::get_profile);

    let body = match &*profile.read() {
        None => rsx! { div { class: "loading", "Loading profile..." } },
        Some(Err(e)) => {
            let error = Error::from_server_error(e);
            if !redirect_if_signed_out(&error) {
                tracing::warn!(%error, "failed to load profile for editing");
            }
            rsx! { div { class: "empty-state", "Could not load your profile: {error}" } }
        }
        Some(Ok(p)) => rsx! { EditProfileForm { profile: p.clone() } },
    };

    rsx! {
        div {
            div { class: "page-header",
                h1 { class: "page-title", "Edit Profile" }
                p { class: "page-subtitle", "Keep your contact details up to date." }
            }
            {body}
        }
    }
}

#[component]
fn EditProfileForm(profile: ProfileData) -> Element {
    let initial = ProfileUpdate::from(&profile);
    let photo_url = initial.photo_url.clone();
    let full_name = use_signal(|| initial.full_name.clone());
    let department = use_signal(|| initial.department.clone());
    let phone = use_signal(|| initial.phone.clone());
    let year_of_study = use_signal(|| initial.year_of_study.clone());
    let mut saving = use_signal(|| false);
    let mut toaster = use_toaster();
    let nav = navigator();

    rsx! {
        div { class: "card",
            ProfileForm { full_name, department, phone, year_of_study }
            div { class: "form-actions",
                Link { to: Route::Profile {}, class: "btn btn-secondary", "Cancel" }
                button {
                    class: "btn btn-primary",
                    disabled: saving(),
                    onclick: move |_| {
                        let update = ProfileUpdate {
                            full_name: full_name.read().trim().to_string(),
                            department: department.read().trim().to_string(),
                            phone: phone.read().trim().to_string(),
                            year_of_study: year_of_study.read().trim().to_string(),
                            photo_url: photo_url.clone(),
                        };
                        spawn(async move {
                            saving.set(true);
                            match api::update_profile(update).await {
                                Ok(()) => {
                                    toaster.success(UPDATE_SUCCESS);
                                    nav.push(Route::Profile {});
                                }
                                Err(e) => {
                                    let error = Error::from_server_error(&e);
                                    tracing::warn!(%error, "profile update failed");
                                    if !redirect_if_signed_out(&error) {
                                        toaster.error(UPDATE_FAILED);
                                    }
                                }
                            }
                            saving.set(false);
                        });
                    },
                    if saving() { "Saving..." } else { "Save Changes" }
                }
            }
        }
    }
}
