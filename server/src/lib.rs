//! REST API for the workout log.
//!
//! # Overview
//! Four routes over one collection of exercise records:
//!
//! | Method | Path | Success |
//! |---|---|---|
//! | GET | `/exercises` | 200, every record |
//! | POST | `/exercises` | 201, the created record |
//! | PUT | `/exercises/{id}` | 200, the updated record |
//! | DELETE | `/exercises/{id}` | 200, `{"message": ...}` |
//!
//! # Design
//! - The [`RecordStore`] handle is passed to [`app`] and lives in router
//!   state; nothing reaches for a global connection.
//! - Bodies are decoded into an untyped draft and validated here, at the
//!   edge, so the store only ever sees well-formed records.
//! - Failures map 1:1 onto 400/404/500 through [`AppError`].

pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod store;

use std::future::Future;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use uuid::Uuid;

pub use config::Config;
pub use error::{AppError, MessageBody};
pub use model::{ExerciseDraft, ExerciseRecord, MuscleGroup, NewExercise, ValidationError};
pub use store::{RecordStore, StoreError};

pub fn app(store: RecordStore) -> Router {
    Router::new()
        .route("/exercises", get(list_exercises).post(create_exercise))
        .route("/exercises/{id}", put(update_exercise).delete(delete_exercise))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(store)
}

/// Serve until the process is killed.
pub async fn run(listener: TcpListener, store: RecordStore) -> Result<(), std::io::Error> {
    run_until(listener, store, std::future::pending()).await
}

/// Serve until `shutdown` resolves, then let in-flight requests finish.
pub async fn run_until<F>(
    listener: TcpListener,
    store: RecordStore,
    shutdown: F,
) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app(store))
        .with_graceful_shutdown(shutdown)
        .await
}

async fn list_exercises(
    State(store): State<RecordStore>,
) -> Result<Json<Vec<ExerciseRecord>>, AppError> {
    Ok(Json(store.list().await?))
}

async fn create_exercise(
    State(store): State<RecordStore>,
    body: Result<Json<ExerciseDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<ExerciseRecord>), AppError> {
    let input = validate_body(body)?;
    let record = store.create(input).await?;
    info!(id = %record.id, name = %record.exercise_name, "exercise logged");
    Ok((StatusCode::CREATED, Json(record)))
}

/// The body is validated before the id is looked up, so a bad body is a 400
/// even when the id is unknown.
async fn update_exercise(
    State(store): State<RecordStore>,
    Path(id): Path<String>,
    body: Result<Json<ExerciseDraft>, JsonRejection>,
) -> Result<Json<ExerciseRecord>, AppError> {
    let input = validate_body(body)?;
    let id = parse_id(&id)?;
    let record = store.update(id, input).await?;
    info!(%id, "exercise updated");
    Ok(Json(record))
}

async fn delete_exercise(
    State(store): State<RecordStore>,
    Path(id): Path<String>,
) -> Result<Json<MessageBody>, AppError> {
    let id = parse_id(&id)?;
    store.delete(id).await?;
    info!(%id, "exercise deleted");
    Ok(Json(MessageBody::new(error::DELETED_MESSAGE)))
}

fn validate_body(body: Result<Json<ExerciseDraft>, JsonRejection>) -> Result<NewExercise, AppError> {
    let Json(draft) = body.map_err(|rejection| ValidationError::Body(rejection.body_text()))?;
    Ok(draft.validate()?)
}

/// A malformed id cannot name any record.
fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound)
}
