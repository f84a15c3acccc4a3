use std::path::{Path, PathBuf};

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;

#[derive(Clone)]
pub struct HealthState {
    backup_path: PathBuf,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthCheck {
    pub status: &'static str,
    pub detail: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: HealthCheck,
    pub backup: HealthCheck,
    pub checked_at: String,
}

pub fn router(backup_path: PathBuf) -> Router {
    Router::new().route("/health", get(health)).with_state(HealthState { backup_path })
}

pub async fn health(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let backup = backup_check(&state.backup_path);
    let ready = backup.status == "ready";

    let payload = HealthResponse {
        status: if ready { "ready" } else { "degraded" },
        service: HealthCheck {
            status: "ready",
            detail: "pixy-server runtime initialized".to_string(),
        },
        backup,
        checked_at: Utc::now().to_rfc3339(),
    };

    let status_code = if ready { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    (status_code, Json(payload))
}

/// The backup file itself may not exist yet; what matters is that the
/// directory it would be written to does.
fn backup_check(path: &Path) -> HealthCheck {
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    if directory.is_dir() {
        HealthCheck {
            status: "ready",
            detail: format!("backup directory `{}` is available", directory.display()),
        }
    } else {
        HealthCheck {
            status: "degraded",
            detail: format!("backup directory `{}` is missing", directory.display()),
        }
    }
}
