//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and either an expected parse result or an expected error kind. Comparing
//! parsed JSON (not raw strings) avoids false negatives from field ordering.

use serde_json::Value;
use uuid::Uuid;
use workout_core::{
    ApiError, ExerciseClient, ExerciseInput, ExerciseRecord, HttpMethod, HttpRequest, HttpResponse,
};

const BASE_URL: &str = "http://localhost:5001";

fn client() -> ExerciseClient {
    ExerciseClient::new(BASE_URL)
}

fn cases(raw: &str) -> Vec<Value> {
    let vectors: Value = serde_json::from_str(raw).unwrap();
    vectors["cases"].as_array().unwrap().clone()
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn input_id(case: &Value) -> Uuid {
    case["input_id"].as_str().unwrap().parse().unwrap()
}

/// Compare method, path, and (when the vector names one) body and headers.
fn assert_request(name: &str, req: &HttpRequest, expected: &Value) {
    assert_eq!(
        req.method,
        parse_method(expected["method"].as_str().unwrap()),
        "{name}: method"
    );
    assert_eq!(
        req.path,
        format!("{BASE_URL}{}", expected["path"].as_str().unwrap()),
        "{name}: path"
    );

    if let Some(headers) = expected.get("headers") {
        let expected_headers: Vec<(String, String)> = headers
            .as_array()
            .unwrap()
            .iter()
            .map(|h| {
                let pair = h.as_array().unwrap();
                (
                    pair[0].as_str().unwrap().to_string(),
                    pair[1].as_str().unwrap().to_string(),
                )
            })
            .collect();
        assert_eq!(req.headers, expected_headers, "{name}: headers");
    }

    match expected.get("body") {
        Some(body) => {
            let actual: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
            assert_eq!(&actual, body, "{name}: body");
        }
        None => assert!(req.body.is_none(), "{name}: body should be None"),
    }
}

fn simulated_response(case: &Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse::new(
        sim["status"].as_u64().unwrap() as u16,
        sim["body"].as_str().unwrap(),
    )
}

/// Match an error against the vector's `expected_error` kind.
fn assert_error(name: &str, err: &ApiError, expected: &str) {
    match expected.split_once(':') {
        Some(("Http", status)) => {
            let status: u16 = status.parse().unwrap();
            assert!(
                matches!(err, ApiError::Http { status: s, .. } if *s == status),
                "{name}: expected HTTP {status}, got {err:?}"
            );
        }
        _ => match expected {
            "NotFound" => assert!(
                matches!(err, ApiError::NotFound { .. }),
                "{name}: expected NotFound, got {err:?}"
            ),
            "Deserialization" => assert!(
                matches!(err, ApiError::Deserialization(_)),
                "{name}: expected Deserialization, got {err:?}"
            ),
            other => panic!("{name}: unknown expected_error: {other}"),
        },
    }
}

/// Check a parse result against `expected_error` or `expected_result`.
fn assert_outcome<T>(name: &str, case: &Value, result: Result<T, ApiError>)
where
    T: PartialEq + std::fmt::Debug + serde::de::DeserializeOwned,
{
    match case.get("expected_error") {
        Some(expected) => assert_error(name, &result.unwrap_err(), expected.as_str().unwrap()),
        None => {
            let expected: T = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(result.unwrap(), expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[test]
fn create_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/create.json")) {
        let name = case["name"].as_str().unwrap();
        let input: ExerciseInput = serde_json::from_value(case["input"].clone()).unwrap();

        let req = c.build_create_exercise(&input).unwrap();
        assert_request(name, &req, &case["expected_request"]);

        let result = c.parse_create_exercise(simulated_response(&case));
        assert_outcome::<ExerciseRecord>(name, &case, result);
    }
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[test]
fn list_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/list.json")) {
        let name = case["name"].as_str().unwrap();

        let req = c.build_list_exercises();
        assert_request(name, &req, &case["expected_request"]);

        let result = c.parse_list_exercises(simulated_response(&case));
        assert_outcome::<Vec<ExerciseRecord>>(name, &case, result);
    }
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[test]
fn update_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/update.json")) {
        let name = case["name"].as_str().unwrap();
        let input: ExerciseInput = serde_json::from_value(case["input"].clone()).unwrap();

        let req = c.build_update_exercise(input_id(&case), &input).unwrap();
        assert_request(name, &req, &case["expected_request"]);

        let result = c.parse_update_exercise(simulated_response(&case));
        assert_outcome::<ExerciseRecord>(name, &case, result);
    }
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[test]
fn delete_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/delete.json")) {
        let name = case["name"].as_str().unwrap();

        let req = c.build_delete_exercise(input_id(&case));
        assert_request(name, &req, &case["expected_request"]);

        let result = c.parse_delete_exercise(simulated_response(&case));
        assert_outcome::<String>(name, &case, result);
    }
}
