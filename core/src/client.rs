//! Stateless HTTP request builder and response parser for the workout log API.
//!
//! # Design
//! `ExerciseClient` holds only a `base_url`. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`. The caller performs the round-trip.

use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{ExerciseInput, ExerciseRecord, ServerMessage};

/// Where the bundled server listens by default.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5001";

#[derive(Debug, Clone)]
pub struct ExerciseClient {
    base_url: String,
}

impl Default for ExerciseClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ExerciseClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/exercises", self.base_url)
    }

    fn record_url(&self, id: Uuid) -> String {
        format!("{}/exercises/{id}", self.base_url)
    }

    pub fn build_list_exercises(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.collection_url(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_exercise(&self, input: &ExerciseInput) -> Result<HttpRequest, ApiError> {
        json_request(HttpMethod::Post, self.collection_url(), input)
    }

    pub fn build_update_exercise(
        &self,
        id: Uuid,
        input: &ExerciseInput,
    ) -> Result<HttpRequest, ApiError> {
        json_request(HttpMethod::Put, self.record_url(id), input)
    }

    pub fn build_delete_exercise(&self, id: Uuid) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: self.record_url(id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_exercises(
        &self,
        response: HttpResponse,
    ) -> Result<Vec<ExerciseRecord>, ApiError> {
        check_status(&response, 200)?;
        decode(&response.body)
    }

    pub fn parse_create_exercise(&self, response: HttpResponse) -> Result<ExerciseRecord, ApiError> {
        check_status(&response, 201)?;
        decode(&response.body)
    }

    pub fn parse_update_exercise(&self, response: HttpResponse) -> Result<ExerciseRecord, ApiError> {
        check_status(&response, 200)?;
        decode(&response.body)
    }

    /// Decode the record echoed back by a create or update, accepting any
    /// 2xx status.
    pub fn parse_saved_exercise(&self, response: HttpResponse) -> Result<ExerciseRecord, ApiError> {
        if !response.is_success() {
            return Err(status_error(&response));
        }
        decode(&response.body)
    }

    /// Returns the server's confirmation message.
    pub fn parse_delete_exercise(&self, response: HttpResponse) -> Result<String, ApiError> {
        check_status(&response, 200)?;
        decode::<ServerMessage>(&response.body).map(|m| m.message)
    }
}

fn json_request(
    method: HttpMethod,
    path: String,
    input: &ExerciseInput,
) -> Result<HttpRequest, ApiError> {
    let body = serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
    Ok(HttpRequest {
        method,
        path,
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body: Some(body),
    })
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant,
/// preferring the server's `{message}` over the raw body.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    Err(status_error(response))
}

fn status_error(response: &HttpResponse) -> ApiError {
    let message = serde_json::from_str::<ServerMessage>(&response.body)
        .map(|m| m.message)
        .unwrap_or_else(|_| response.body.clone());
    if response.status == 404 {
        return ApiError::NotFound { message };
    }
    ApiError::Http {
        status: response.status,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MuscleGroup;

    const RECORD: &str = r#"{"id":"00000000-0000-0000-0000-000000000001","exerciseName":"Bench Press","weight":135,"reps":5,"muscleGroup":"Chest"}"#;

    fn client() -> ExerciseClient {
        ExerciseClient::new("http://localhost:5001")
    }

    fn bench_press() -> ExerciseInput {
        ExerciseInput {
            exercise_name: "Bench Press".to_string(),
            weight: 135.0,
            reps: 5.0,
            muscle_group: MuscleGroup::Chest,
        }
    }

    #[test]
    fn build_list_exercises_produces_correct_request() {
        let req = client().build_list_exercises();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:5001/exercises");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_create_exercise_produces_correct_request() {
        let req = client().build_create_exercise(&bench_press()).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:5001/exercises");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["exerciseName"], "Bench Press");
        assert_eq!(body["weight"], 135.0);
        assert_eq!(body["muscleGroup"], "Chest");
    }

    #[test]
    fn build_update_exercise_targets_the_record() {
        let req = client()
            .build_update_exercise(Uuid::nil(), &bench_press())
            .unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(
            req.path,
            "http://localhost:5001/exercises/00000000-0000-0000-0000-000000000000"
        );
        assert!(req.body.is_some());
    }

    #[test]
    fn build_delete_exercise_has_no_body() {
        let req = client().build_delete_exercise(Uuid::nil());
        assert_eq!(req.method, HttpMethod::Delete);
        assert!(req.body.is_none());
    }

    #[test]
    fn parse_list_exercises_success() {
        let response = HttpResponse::new(200, format!("[{RECORD}]"));
        let records = client().parse_list_exercises(response).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].exercise_name, "Bench Press");
        assert_eq!(records[0].muscle_group, MuscleGroup::Chest);
    }

    #[test]
    fn parse_create_exercise_success() {
        let record = client()
            .parse_create_exercise(HttpResponse::new(201, RECORD))
            .unwrap();
        assert_eq!(record.weight, 135.0);
    }

    #[test]
    fn parse_create_exercise_surfaces_server_message() {
        let response = HttpResponse::new(
            400,
            r#"{"message":"exercise validation failed: reps: reps is required"}"#,
        );
        let err = client().parse_create_exercise(response).unwrap_err();
        assert_eq!(
            err,
            ApiError::Http {
                status: 400,
                message: "exercise validation failed: reps: reps is required".to_string(),
            }
        );
    }

    #[test]
    fn parse_update_exercise_not_found() {
        let response = HttpResponse::new(404, r#"{"message":"Exercise not found"}"#);
        let err = client().parse_update_exercise(response).unwrap_err();
        assert_eq!(
            err,
            ApiError::NotFound {
                message: "Exercise not found".to_string()
            }
        );
    }

    #[test]
    fn parse_saved_exercise_accepts_any_success_status() {
        let record = client()
            .parse_saved_exercise(HttpResponse::new(200, RECORD))
            .unwrap();
        assert_eq!(record.exercise_name, "Bench Press");

        let err = client()
            .parse_saved_exercise(HttpResponse::new(201, r#"{"ok":true}"#))
            .unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));

        let err = client()
            .parse_saved_exercise(HttpResponse::new(400, r#"{"message":"bad"}"#))
            .unwrap_err();
        assert!(matches!(err, ApiError::Http { status: 400, .. }));
    }

    #[test]
    fn parse_delete_exercise_returns_message() {
        let response = HttpResponse::new(200, r#"{"message":"Exercise deleted successfully"}"#);
        let message = client().parse_delete_exercise(response).unwrap();
        assert_eq!(message, "Exercise deleted successfully");
    }

    #[test]
    fn non_json_error_body_is_kept_raw() {
        let err = client()
            .parse_list_exercises(HttpResponse::new(502, "bad gateway"))
            .unwrap_err();
        assert!(matches!(err, ApiError::Http { status: 502, ref message } if message == "bad gateway"));
    }

    #[test]
    fn parse_list_exercises_bad_json() {
        let err = client()
            .parse_list_exercises(HttpResponse::new(200, "not json"))
            .unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = ExerciseClient::new("http://localhost:5001/");
        assert_eq!(client.base_url(), "http://localhost:5001");
        assert_eq!(
            client.build_list_exercises().path,
            "http://localhost:5001/exercises"
        );
    }

    #[test]
    fn default_targets_local_server() {
        assert_eq!(ExerciseClient::default().base_url(), DEFAULT_BASE_URL);
    }
}
