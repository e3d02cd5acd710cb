//! User handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use subsvc_core::{User, UserId};

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::AppState;

/// User response.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    /// User ID.
    pub id: UserId,
    /// Email as registered.
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
        }
    }
}

/// Create user request.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    /// Email address (not validated).
    pub email: String,
}

/// Create a new user.
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<CreateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.subscriptions.create_user(body.email)?;

    Ok(Json(user.into()))
}
