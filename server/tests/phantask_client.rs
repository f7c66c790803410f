//! Tests for the PhanTask backend client against a mock server.

use secrecy::SecretString;
use server::PhanTaskClient;
use types::{ErrorKind, ProfileUpdate, Uid};
use url::Url;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> PhanTaskClient {
    PhanTaskClient::new(Url::parse(&server.uri()).unwrap()).unwrap()
}

fn token() -> SecretString {
    "jwt-123".to_string().into()
}

#[tokio::test]
async fn login_returns_token_and_roles() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(serde_json::json!({"username": "admin", "password": "pw"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "token": "jwt-123",
            "refreshToken": "refresh",
            "role": ["ADMIN"],
            "requirePasswordChange": false
        })))
        .mount(&server)
        .await;

    let response = client(&server).login("admin", "pw").await.unwrap();

    assert_eq!(response.token.as_deref(), Some("jwt-123"));
    assert_eq!(response.refresh_token.as_deref(), Some("refresh"));
    assert_eq!(response.roles, vec!["ADMIN"]);
    assert!(!response.require_password_change);
}

#[tokio::test]
async fn bad_credentials_are_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": "Invalid username or password"
        })))
        .mount(&server)
        .await;

    let err = client(&server).login("admin", "wrong").await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::Unauthorized);
    assert_eq!(err.message, "Invalid username or password");
}

#[tokio::test]
async fn active_users_are_fetched_with_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/users/active"))
        .and(header("authorization", "Bearer jwt-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"uid": 1, "username": "user10", "email": "ten@x.com", "roles": ["STUDENT"]},
            {"uid": 2, "username": "root", "email": "root@x.com", "roles": ["ADMIN"]}
        ])))
        .mount(&server)
        .await;

    let users = client(&server).list_active_users(&token()).await.unwrap();

    assert_eq!(users.len(), 2);
    assert_eq!(users[0].uid, Uid::new("1"));
    assert!(users[1].is_admin());
}

#[tokio::test]
async fn deactivate_maps_status_codes() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/admin/users/7/deactivate"))
        .respond_with(ResponseTemplate::new(200).set_body_string("User deactivated"))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/admin/users/8/deactivate"))
        .respond_with(ResponseTemplate::new(404).set_body_string("User not found"))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/admin/users/9/deactivate"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let client = client(&server);
    client.deactivate_user(&token(), &Uid::new("7")).await.unwrap();

    let missing = client
        .deactivate_user(&token(), &Uid::new("8"))
        .await
        .unwrap_err();
    assert_eq!(missing.kind, ErrorKind::NotFound);
    assert_eq!(missing.message, "User not found");

    let forbidden = client
        .deactivate_user(&token(), &Uid::new("9"))
        .await
        .unwrap_err();
    assert_eq!(forbidden.kind, ErrorKind::Forbidden);
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    let server = MockServer::start().await;
    let client = client(&server);
    drop(server);

    let err = client.me(&token()).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Network);
}

#[tokio::test]
async fn profile_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "fullName": "Alice Liddell",
            "department": "CS",
            "phone": null,
            "yearOfStudy": "3"
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/users/update-profile"))
        .and(body_json(serde_json::json!({
            "fullName": "Alice L.",
            "department": "CS",
            "phone": "555",
            "yearOfStudy": "3",
            "photoUrl": null
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string("Profile updated"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let profile = client.profile(&token()).await.unwrap();
    assert_eq!(profile.full_name.as_deref(), Some("Alice Liddell"));
    assert_eq!(profile.phone, None);

    let update = ProfileUpdate {
        full_name: "Alice L.".into(),
        phone: "555".into(),
        ..ProfileUpdate::from(&profile)
    };
    client.update_profile(&token(), &update).await.unwrap();
}

#[tokio::test]
async fn create_student_returns_backend_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/users/create-student"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "Student account created successfully. Temporary password: Temp@123",
        ))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/users/create-student"))
        .and(body_json(serde_json::json!({"username": "taken", "email": "t@x.com"})))
        .respond_with(ResponseTemplate::new(400).set_body_string("Username already exists"))
        .with_priority(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let message = client
        .create_student(&token(), "user3", "u3@x.com")
        .await
        .unwrap();
    assert!(message.contains("Temp@123"));

    let err = client
        .create_student(&token(), "taken", "t@x.com")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Invalid);
    assert_eq!(err.message, "Username already exists");
}
