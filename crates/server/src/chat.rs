use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, post};
use axum::{Json, Router};
use chrono::Utc;
use pixy_core::config::AppConfig;
use pixy_core::{ApplicationError, DomainError, InterfaceError};
use pixy_delivery::{DeliveryOutcome, LeadPipeline};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::sessions::SessionRegistry;

#[derive(Clone)]
pub struct ChatState {
    pub registry: Arc<SessionRegistry>,
    pub pipeline: Arc<LeadPipeline>,
    pub config: Arc<AppConfig>,
}

#[derive(Debug, Serialize)]
pub struct SessionCreated {
    pub session_id: Uuid,
    pub replies: Vec<String>,
    pub quick_replies: Vec<String>,
    pub typing_delay_ms: u64,
}

#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub replies: Vec<String>,
    pub quick_replies: Vec<String>,
    pub closed: bool,
    pub typing_delay_ms: u64,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub correlation_id: String,
}

fn reject(status: StatusCode, error: InterfaceError) -> (StatusCode, Json<ErrorResponse>) {
    let correlation_id = error.correlation_id().to_string();
    (status, Json(ErrorResponse { error: error.to_string(), correlation_id }))
}

pub fn router(state: ChatState) -> Router {
    Router::new()
        .route("/api/sessions", post(create_session))
        .route("/api/sessions/{session_id}/messages", post(post_message))
        .route("/api/sessions/{session_id}", delete(end_session))
        .with_state(state)
}

async fn create_session(State(state): State<ChatState>) -> (StatusCode, Json<SessionCreated>) {
    let (session_id, engine) = state.registry.create();
    let greeting = engine.lock().await.greeting();

    info!(
        event_name = "chat.session_created",
        session_id = %session_id,
        open_sessions = state.registry.len(),
        "chat session created"
    );

    (
        StatusCode::CREATED,
        Json(SessionCreated {
            session_id,
            replies: greeting.replies,
            quick_replies: greeting.quick_replies,
            typing_delay_ms: state.config.widget.typing_delay_ms,
        }),
    )
}

async fn post_message(
    State(state): State<ChatState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<MessageRequest>,
) -> Result<Json<MessageResponse>, (StatusCode, Json<ErrorResponse>)> {
    let Some(engine) = state.registry.get(&session_id) else {
        let error = ApplicationError::from(DomainError::UnknownSession(session_id.to_string()))
            .into_interface(session_id.to_string());
        return Err(reject(StatusCode::NOT_FOUND, error));
    };

    // Re-entrancy guard: input arriving while a reply is in flight is
    // dropped, not queued.
    let Ok(mut engine) = engine.try_lock() else {
        warn!(
            event_name = "chat.concurrent_input_dropped",
            session_id = %session_id,
            "input dropped while previous message was processing"
        );
        let error = ApplicationError::from(DomainError::SessionBusy)
            .into_interface(session_id.to_string());
        return Err(reject(StatusCode::CONFLICT, error));
    };

    let mut output = engine.process(&request.text);

    if let Some(draft) = output.lead.take() {
        let record = draft.into_record(Utc::now());
        let outcome = state.pipeline.deliver(&record).await;
        match outcome {
            DeliveryOutcome::Delivered => {}
            DeliveryOutcome::BackedUp { .. } | DeliveryOutcome::Lost { .. } => {
                output.replies.push(fallback_message(&state.config));
            }
        }
        info!(
            event_name = "chat.lead_finalized",
            session_id = %session_id,
            delivered = outcome.is_delivered(),
            "lead capture flow completed"
        );
    }

    Ok(Json(MessageResponse {
        closed: engine.stage().is_closed(),
        replies: output.replies,
        quick_replies: output.quick_replies,
        typing_delay_ms: state.config.widget.typing_delay_ms,
    }))
}

async fn end_session(
    State(state): State<ChatState>,
    Path(session_id): Path<Uuid>,
) -> StatusCode {
    if state.registry.remove(&session_id) {
        info!(
            event_name = "chat.session_ended",
            session_id = %session_id,
            "chat session removed"
        );
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

/// Manual-contact fallback shown when the lead could not be submitted
/// automatically. The conversation still ends; there is no retry.
fn fallback_message(config: &AppConfig) -> String {
    format!(
        "We couldn't send your details automatically just now. Please reach us directly at \
         {} or {} and we'll take it from there.",
        config.submission.fallback_email, config.submission.fallback_phone
    )
}
