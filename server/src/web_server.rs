use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use common::log;
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};

use crate::error::ServiceError;
use crate::game_service::{GameService, GameStatusResponse};

#[derive(Debug, Deserialize)]
pub struct NewUserRequest {
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct CellClickRequest {
    pub x: usize,
    pub y: usize,
}

pub fn build_router(service: GameService) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/users", post(new_user_handler))
        .route("/users/{username}/latest_game", get(latest_game_handler))
        .route("/users/{username}/new_game", post(new_game_handler))
        .route("/users/{username}/cell_click", post(cell_click_handler))
        .layer(cors)
        .with_state(service)
}

pub async fn run_web_server(service: GameService, bind_address: &str) -> Result<(), String> {
    let app = build_router(service);

    let listener = tokio::net::TcpListener::bind(bind_address)
        .await
        .map_err(|e| format!("Failed to bind web server address {}: {}", bind_address, e))?;
    log!("Web server listening on {}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| format!("Web server error: {}", e))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    log!("Shutdown signal received");
}

async fn new_user_handler(
    State(service): State<GameService>,
    Json(request): Json<NewUserRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let username = service.create_user(&request.username).await?;
    Ok((StatusCode::CREATED, Json(json!({ "username": username }))))
}

async fn latest_game_handler(
    State(service): State<GameService>,
    Path(username): Path<String>,
) -> Result<Json<GameStatusResponse>, ServiceError> {
    service.latest_game(&username).await.map(Json)
}

async fn new_game_handler(
    State(service): State<GameService>,
    Path(username): Path<String>,
) -> Result<Json<GameStatusResponse>, ServiceError> {
    service.new_game(&username).await.map(Json)
}

async fn cell_click_handler(
    State(service): State<GameService>,
    Path(username): Path<String>,
    Json(request): Json<CellClickRequest>,
) -> Result<Json<GameStatusResponse>, ServiceError> {
    service
        .cell_click(&username, request.x, request.y)
        .await
        .map(Json)
}
