//! Integration tests for the farmer self-service profile client.

mod common;

use assert_matches::assert_matches;
use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{client_for, logged_in_client, route, StubBackend};
use kukkuta_client::domain::farmer::FarmerProfileUpdate;
use kukkuta_client::domain::roles::UserRole;
use kukkuta_client::ClientError;

#[tokio::test]
async fn farmer_profile_get_and_patch() {
    let profile = json!({
        "id": 7, "user_id": 21, "phone": "9876543210", "address": "Sanjarwas",
        "farm_type": "broiler", "experience_years": null, "is_verified": true,
        "created_at": "2024-01-30T10:00:00", "farms": [{
            "id": 1, "farmer_id": 7, "name": "Shed A", "location": "Sanjarwas",
            "capacity": 5000, "current_stock": 4790, "farm_size": 1.5,
            "is_active": true, "created_at": "2024-01-30T10:00:00"
        }]
    });
    let backend = StubBackend::start(vec![
        route(Method::GET, "/api/v1/farmers/me", StatusCode::OK, profile.clone()),
        route(Method::PUT, "/api/v1/farmers/me", StatusCode::OK, profile),
    ])
    .await;
    let (client, _) = logged_in_client(&backend, UserRole::Farmer).await;

    let me = client.farmer().get_profile().await.unwrap();
    assert_eq!(me.farms[0].current_stock, Some(4790));
    assert_eq!(me.experience_years, None);

    let patch = FarmerProfileUpdate {
        address: Some("Rewari".into()),
        ..Default::default()
    };
    client.farmer().update_profile(&patch).await.unwrap();
    assert_eq!(backend.requests()[1].json(), json!({"address": "Rewari"}));
}

#[tokio::test]
async fn profile_without_session_is_not_requested() {
    let backend = StubBackend::start(vec![]).await;
    let (client, _) = client_for(&backend);

    let err = client.farmer().get_profile().await.unwrap_err();

    assert_matches!(err, ClientError::NotAuthenticated);
    assert_eq!(backend.request_count(), 0);
}

#[tokio::test]
async fn profile_update_failure_uses_fallback_message() {
    let backend = StubBackend::start(vec![route(
        Method::PUT,
        "/api/v1/farmers/me",
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({}),
    )])
    .await;
    let (client, _) = logged_in_client(&backend, UserRole::Farmer).await;

    let err = client
        .farmer()
        .update_profile(&FarmerProfileUpdate::default())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert_eq!(err.to_string(), "Failed to update profile");
}
