//! HTTP API tests driving the router in-process.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use minimax_tictactoe::Side;
use serde_json::{Value, json};
use std::sync::Arc;
use tictactoe_server::{AppState, create_app};
use tower::ServiceExt;

fn app(first: Side) -> Router {
    create_app(Arc::new(AppState::new(first)))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<String>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(body) => {
            builder = builder.header("content-type", "application/json");
            Body::from(body)
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn post_move(app: &Router, position: usize) -> (StatusCode, Value) {
    send(app, "POST", "/move", Some(json!({ "position": position }).to_string())).await
}

fn cells(board: &Value) -> Vec<&str> {
    board
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c.as_str().unwrap())
        .collect()
}

fn count(board: &Value, mark: &str) -> usize {
    cells(board).into_iter().filter(|c| *c == mark).count()
}

#[tokio::test]
async fn test_initial_board_is_empty() {
    let app = app(Side::Human);
    let (status, body) = send(&app, "GET", "/board", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(cells(&body["board"]), vec![""; 9]);
    assert_eq!(body["status"], "ongoing");
    assert_eq!(body["can_undo"], false);
}

#[tokio::test]
async fn test_center_move_gets_corner_reply() {
    let app = app(Side::Human);
    let (status, body) = post_move(&app, 4).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ai_move"], 0);
    assert_eq!(body["status"], "ongoing");
    let board = cells(&body["board"]);
    assert_eq!(board[4], "X");
    assert_eq!(board[0], "O");

    let (_, snapshot) = send(&app, "GET", "/board", None).await;
    assert_eq!(snapshot["board"], body["board"]);
    assert_eq!(snapshot["can_undo"], true);
}

#[tokio::test]
async fn test_occupied_cell_rejected_with_board() {
    let app = app(Side::Human);
    let (_, played) = post_move(&app, 4).await;

    let (status, body) = post_move(&app, 4).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid move: position 4 is not available");
    assert_eq!(body["board"], played["board"]);
}

#[tokio::test]
async fn test_out_of_range_rejected() {
    let app = app(Side::Human);
    let (status, body) = post_move(&app, 9).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid move: position 9 is not available");
    assert_eq!(count(&body["board"], ""), 9);
}

#[tokio::test]
async fn test_malformed_move_bodies_rejected_with_board() {
    let app = app(Side::Human);
    let (_, played) = post_move(&app, 4).await;

    for payload in [r#"{"position":-1}"#, "{}", r#"{"position":"four"}"#, "not json"] {
        let (status, body) = send(&app, "POST", "/move", Some(payload.to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload {payload}");
        assert!(
            body["error"].as_str().unwrap().starts_with("Invalid move request"),
            "payload {payload}"
        );
        assert_eq!(body["board"], played["board"], "payload {payload}");
    }

    let (_, snapshot) = send(&app, "GET", "/board", None).await;
    assert_eq!(snapshot["board"], played["board"]);
}

#[tokio::test]
async fn test_move_after_game_over_conflicts() {
    let app = app(Side::Human);
    let mut last = Value::Null;
    for _ in 0..5 {
        let (_, snapshot) = send(&app, "GET", "/board", None).await;
        if snapshot["status"] != "ongoing" {
            break;
        }
        let pos = cells(&snapshot["board"])
            .iter()
            .position(|c| c.is_empty())
            .unwrap();
        let (status, body) = post_move(&app, pos).await;
        assert_eq!(status, StatusCode::OK);
        last = body;
    }
    assert_ne!(last["status"], "ongoing");
    assert_ne!(last["status"], "human_win");

    let free = cells(&last["board"]).iter().position(|c| c.is_empty()).unwrap_or(0);
    let (status, body) = post_move(&app, free).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Game over. Please reset the game.");
    assert_eq!(body["board"], last["board"]);
}

#[tokio::test]
async fn test_reset_without_body_defaults_to_human() {
    let app = app(Side::Human);
    post_move(&app, 4).await;

    let (status, body) = send(&app, "POST", "/reset", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "reset");
    assert_eq!(body["first"], "human");
    assert_eq!(count(&body["board"], ""), 9);

    let (_, snapshot) = send(&app, "GET", "/board", None).await;
    assert_eq!(snapshot["can_undo"], false);
}

#[tokio::test]
async fn test_reset_ai_first() {
    let app = app(Side::Human);
    let (status, body) = send(&app, "POST", "/reset", Some(r#"{"first":"ai"}"#.to_string())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "reset");
    assert_eq!(body["first"], "ai");
    assert_eq!(count(&body["board"], "O"), 1);
    assert_eq!(count(&body["board"], ""), 8);
}

#[tokio::test]
async fn test_malformed_reset_rejected() {
    let app = app(Side::Human);
    let (_, played) = post_move(&app, 4).await;

    let (status, body) = send(&app, "POST", "/reset", Some(r#"{"first":"nobody"}"#.to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["board"], played["board"]);
}

#[tokio::test]
async fn test_undo_once() {
    let app = app(Side::Human);
    post_move(&app, 4).await;

    let (status, body) = send(&app, "POST", "/undo", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "undo_success");
    assert_eq!(count(&body["board"], ""), 9);

    let (status, body) = send(&app, "POST", "/undo", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "No moves to undo");
}

#[tokio::test]
async fn test_ai_first_server() {
    let app = app(Side::Ai);
    let (_, body) = send(&app, "GET", "/board", None).await;
    assert_eq!(count(&body["board"], "O"), 1);
    assert_eq!(body["can_undo"], false);
}

#[tokio::test]
async fn test_index_and_health() {
    let app = app(Side::Human);
    let response = app
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(String::from_utf8_lossy(&bytes).contains("Tic-Tac-Toe"));

    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}
