use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use common::{EngineError, GameId, Username};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("invalid username: {0}")]
    InvalidUsername(String),

    #[error("username '{0}' already exists")]
    UserExists(Username),

    #[error("invalid username '{0}'")]
    UnknownUser(Username),

    #[error("game {0} not found")]
    GameNotFound(GameId),

    #[error("illegal move: {0}")]
    IllegalMove(EngineError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<EngineError> for ServiceError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::CellOccupied { .. }
            | EngineError::OutOfBounds { .. }
            | EngineError::GameOver => ServiceError::IllegalMove(err),
            other => ServiceError::Internal(other.to_string()),
        }
    }
}

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::InvalidUsername(_) => StatusCode::BAD_REQUEST,
            ServiceError::UserExists(_) => StatusCode::CONFLICT,
            ServiceError::UnknownUser(_) | ServiceError::GameNotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::IllegalMove(_) => StatusCode::FORBIDDEN,
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.to_string() }));
        (self.status_code(), body).into_response()
    }
}
