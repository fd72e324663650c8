//! End-to-end tests: the real router served on an ephemeral port,
//! exercised through `parley_client::ApiClient`.

use parley_client::{ApiClient, ApiError, RoomsApi};
use parley_protocol::{RoomId, USER_ID_HEADER};
use parley_server::{AppState, SharedState, router};

async fn spawn(state: SharedState) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = router(state);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn seeded_server() -> String {
    spawn(AppState::seeded().await).await
}

fn client(base_url: &str, user_id: &str) -> ApiClient {
    ApiClient::new(base_url).with_user(user_id)
}

async fn lobby_id(client: &ApiClient) -> RoomId {
    client
        .rooms()
        .await
        .unwrap()
        .into_iter()
        .find(|room| room.name == "Lobby")
        .unwrap()
        .id
}

#[tokio::test]
async fn current_user_matches_the_identity_header() {
    let base = seeded_server().await;

    let user = client(&base, "u1").current_user().await.unwrap();
    assert_eq!(user.username, "alice");
}

#[tokio::test]
async fn missing_or_unknown_identity_is_unauthorized() {
    let base = seeded_server().await;

    let anonymous = ApiClient::new(&base);
    assert!(matches!(
        anonymous.current_user().await,
        Err(ApiError::Unauthorized)
    ));

    let ghost = client(&base, "nobody");
    assert!(matches!(ghost.rooms().await, Err(ApiError::Unauthorized)));
}

#[tokio::test]
async fn join_is_idempotent_and_participant_appears_once() {
    let base = seeded_server().await;
    let alice = client(&base, "u1");
    let lobby = lobby_id(&alice).await;

    alice.join_room(&lobby).await.unwrap();
    alice.join_room(&lobby).await.unwrap();

    let rooms = alice.rooms().await.unwrap();
    let lobby = rooms.iter().find(|room| room.id == lobby).unwrap();
    let joined = lobby
        .participants
        .iter()
        .filter(|p| p.id.as_str() == "u1")
        .count();
    assert_eq!(joined, 1);
    // bob (the creator) plus alice
    assert_eq!(lobby.participants.len(), 2);
}

#[tokio::test]
async fn leave_removes_the_participant() {
    let base = seeded_server().await;
    let alice = client(&base, "u1");
    let lobby = lobby_id(&alice).await;

    alice.join_room(&lobby).await.unwrap();
    alice.leave_room(&lobby).await.unwrap();
    // leaving a room the user is not in still succeeds
    alice.leave_room(&lobby).await.unwrap();

    let rooms = alice.rooms().await.unwrap();
    let lobby = rooms.iter().find(|room| room.id == lobby).unwrap();
    assert!(!lobby.has_participant(&"u1".into()));
}

#[tokio::test]
async fn only_the_creator_may_delete() {
    let base = seeded_server().await;
    let alice = client(&base, "u1");
    let lobby = lobby_id(&alice).await;

    let error = alice.delete_room(&lobby).await.unwrap_err();
    assert!(matches!(error, ApiError::Forbidden));

    // The room is still listed.
    assert_eq!(alice.rooms().await.unwrap().len(), 1);

    let bob = client(&base, "u2");
    bob.delete_room(&lobby).await.unwrap();
    assert!(alice.rooms().await.unwrap().is_empty());

    // Its message log is gone with it.
    assert!(matches!(
        alice.messages(&lobby).await,
        Err(ApiError::NotFound)
    ));
}

#[tokio::test]
async fn created_room_lists_the_creator_as_participant() {
    let base = seeded_server().await;
    let alice = client(&base, "u1");

    let room = alice.create_room("Random").await.unwrap();
    assert_eq!(room.creator.username, "alice");
    assert!(room.has_participant(&"u1".into()));

    let names: Vec<String> = alice
        .rooms()
        .await
        .unwrap()
        .into_iter()
        .map(|room| room.name)
        .collect();
    assert_eq!(names, ["Lobby", "Random"]);
}

#[tokio::test]
async fn posting_requires_participation() {
    let base = seeded_server().await;
    let carol = client(&base, "u3");
    let lobby = lobby_id(&carol).await;

    let error = carol.send_message(&lobby, "hi").await.unwrap_err();
    assert!(matches!(error, ApiError::Forbidden));

    carol.join_room(&lobby).await.unwrap();
    let message = carol.send_message(&lobby, "hi").await.unwrap();
    assert_eq!(message.sender.username, "carol");
}

#[tokio::test]
async fn blank_message_content_is_a_bad_request() {
    let base = seeded_server().await;
    let bob = client(&base, "u2");
    let lobby = lobby_id(&bob).await;

    let error = bob.send_message(&lobby, "   ").await.unwrap_err();
    match error {
        ApiError::Status(status) => assert_eq!(status.as_u16(), 400),
        other => panic!("expected Status(400), got {other:?}"),
    }
}

#[tokio::test]
async fn messages_come_back_in_send_order() {
    let base = seeded_server().await;
    let bob = client(&base, "u2");
    let lobby = lobby_id(&bob).await;

    bob.send_message(&lobby, "first").await.unwrap();
    bob.send_message(&lobby, "second").await.unwrap();

    let log = bob.messages(&lobby).await.unwrap();
    let contents: Vec<&str> = log.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, ["first", "second"]);
}

#[tokio::test]
async fn wire_shapes_use_the_envelope_and_error_body() {
    let base = seeded_server().await;
    let http = reqwest::Client::new();

    let body: serde_json::Value = http
        .get(format!("{base}/api/room"))
        .header(USER_ID_HEADER, "u1")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(body["data"].is_array());

    let response = http
        .get(format!("{base}/api/messages/no-such-room"))
        .header(USER_ID_HEADER, "u1")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], serde_json::json!(false));
    assert!(body["message"].as_str().unwrap().contains("room not found"));
}
