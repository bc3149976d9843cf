//! Demo data and runtime introspection under `/api`.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::data::{Item, User, ITEMS, USERS};
use crate::error::AppError;
use crate::runtime::RuntimeInfo;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UsersResponse {
    pub users: &'static [User],
}

#[derive(Debug, Serialize)]
pub struct ItemsResponse {
    pub items: &'static [Item],
}

pub async fn list_users() -> Json<UsersResponse> {
    Json(UsersResponse { users: USERS })
}

pub async fn list_items() -> Json<ItemsResponse> {
    Json(ItemsResponse { items: ITEMS })
}

/// Report runtime version, platform, memory usage and environment name.
///
/// Memory sampling reads from the OS, so it runs on the blocking pool.
pub async fn env(State(state): State<AppState>) -> Result<Json<RuntimeInfo>, AppError> {
    let config = state.config.clone();
    let info = tokio::task::spawn_blocking(move || RuntimeInfo::collect(&config.service))
        .await
        .map_err(|e| AppError::Internal(format!("Runtime probe task failed: {}", e)))??;

    Ok(Json(info))
}
