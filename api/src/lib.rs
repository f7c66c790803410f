use dioxus::prelude::*;
use types::{CurrentUser, Profile, ProfileUpdate, Uid, UserRecord};

/// Identity check for the session gate. `None` means "not signed in".
#[post("/api/current-user")]
pub async fn get_current_user() -> ServerFnResult<Option<CurrentUser>> {
    Ok(server::current_user().await?)
}

#[post("/api/profile")]
pub async fn get_profile() -> ServerFnResult<Profile> {
    let session = server::get_session_from_cookie().await?;
    Ok(server::state()?
        .client
        .profile(&session.access_token)
        .await?)
}

#[post("/api/profile/update")]
pub async fn update_profile(update: ProfileUpdate) -> ServerFnResult<()> {
    let session = server::get_session_from_cookie().await?;
    server::state()?
        .client
        .update_profile(&session.access_token, &update)
        .await?;
    tracing::info!(username = %session.username, "profile updated");
    Ok(())
}

#[post("/api/users/active")]
pub async fn list_active_users() -> ServerFnResult<Vec<UserRecord>> {
    let session = server::require_admin_session().await?;
    Ok(server::state()?
        .client
        .list_active_users(&session.access_token)
        .await?)
}

#[post("/api/users/deactivate")]
pub async fn deactivate_user(uid: Uid) -> ServerFnResult<()> {
    let session = server::require_admin_session().await?;
    server::state()?
        .client
        .deactivate_user(&session.access_token, &uid)
        .await?;
    tracing::info!(admin = %session.username, %uid, "user deactivated");
    Ok(())
}

/// Create a student account; returns the backend's message with the temporary password.
#[post("/api/users/create-student")]
pub async fn create_student(username: String, email: String) -> ServerFnResult<String> {
    let session = server::require_admin_session().await?;
    let message = server::state()?
        .client
        .create_student(&session.access_token, &username, &email)
        .await?;
    tracing::info!(admin = %session.username, student = %username, "student created");
    Ok(message)
}
