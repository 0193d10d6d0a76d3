use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use usersync_client::{ClientError, UsersyncClient};
use usersync_core::cache::{CacheStore, Snapshot};
use usersync_core::mutation::{MutationCoordinator, MutationError, MutationKind};
use usersync_core::remote::{RemoteError, UserRemote};
use usersync_core::user::User;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn leanne() -> User {
    User::new("Leanne Graham", "Sincere@april.biz", "").with_id(1)
}

#[tokio::test]
async fn test_list_users_ignores_extra_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 1,
                "name": "Leanne Graham",
                "username": "Bret",
                "email": "Sincere@april.biz",
                "address": {"city": "Gwenborough"}
            },
            {"id": 2, "name": "Ervin Howell", "email": null, "role": "admin"}
        ])))
        .mount(&server)
        .await;

    let client = UsersyncClient::new(server.uri());
    let users = client.list_users().await.unwrap();

    assert_eq!(
        users,
        vec![leanne(), User::new("Ervin Howell", "", "admin").with_id(2)]
    );
}

#[tokio::test]
async fn test_create_posts_json_without_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users"))
        .and(body_json(json!({"name": "A", "email": "a@x.com", "role": "admin"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 11, "name": "A", "email": "a@x.com", "role": "admin"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = UsersyncClient::new(server.uri());
    let created = client
        .create_user(&User::new("A", "a@x.com", "admin"))
        .await
        .unwrap();

    assert_eq!(created, User::new("A", "a@x.com", "admin").with_id(11));
}

#[tokio::test]
async fn test_update_puts_to_user_path() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/users/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 3, "name": "C2", "email": "c@x.com", "role": "viewer"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = UsersyncClient::new(server.uri());
    let updated = client
        .update_user(&User::new("C2", "c@x.com", "viewer").with_id(3))
        .await
        .unwrap();

    assert_eq!(updated.name, "C2");
}

#[tokio::test]
async fn test_update_without_id_is_rejected_locally() {
    let server = MockServer::start().await;

    let client = UsersyncClient::new(server.uri());
    let err = client
        .update_user(&User::new("C", "c@x.com", ""))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::InvalidInput(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_ignores_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/users/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = UsersyncClient::new(server.uri());

    client.delete_user(3).await.unwrap();
}

#[tokio::test]
async fn test_not_found_and_server_errors() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/users/9"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database offline"))
        .mount(&server)
        .await;

    let client = UsersyncClient::new(server.uri());

    let err = client.delete_user(9).await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound { ref resource } if resource == "User 9"));

    let err = client.list_users().await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::ServerError { status: 500, ref message } if message == "database offline"
    ));
}

#[tokio::test]
async fn test_timeout_surfaces_as_remote_request_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let client = UsersyncClient::with_timeout(server.uri(), Duration::from_millis(100)).unwrap();
    let err = client.fetch_all().await.unwrap_err();

    assert!(matches!(err, RemoteError::Request(_)));
}

#[tokio::test]
async fn test_coordinator_reconciles_created_user_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 11, "name": "A", "email": "a@x.com", "role": "admin"
        })))
        .mount(&server)
        .await;

    let store = CacheStore::with_snapshot(Snapshot::new(vec![leanne()]));
    let coordinator = MutationCoordinator::new(store, Arc::new(UsersyncClient::new(server.uri())));

    coordinator
        .create(User::new("A", "a@x.com", "admin"))
        .await
        .unwrap();

    assert_eq!(
        coordinator.store().get().to_users(),
        vec![leanne(), User::new("A", "a@x.com", "admin").with_id(11)]
    );
}

#[tokio::test]
async fn test_coordinator_rolls_back_failed_update_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/users/1"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let before = Snapshot::new(vec![leanne()]);
    let store = CacheStore::with_snapshot(before.clone());
    let coordinator = MutationCoordinator::new(store, Arc::new(UsersyncClient::new(server.uri())));

    let err = coordinator
        .update(User::new("Renamed", "r@x.com", "").with_id(1))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        MutationError::Transport {
            kind: MutationKind::Update,
            source: RemoteError::Status {
                status: 503,
                message: "maintenance".to_string(),
            },
        }
    );
    assert_eq!(coordinator.store().get(), before);
}
