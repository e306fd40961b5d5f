//! Web API Record Tests
//!
//! Integration tests for the college, program and student endpoints.

mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};

use common::{admin_token, bearer, create_college, create_program, create_test_server, student_json};

// ============================================================================
// Authorization
// ============================================================================

#[tokio::test]
async fn test_record_routes_require_token() {
    let (server, _db) = create_test_server().await;

    server
        .get("/colleges")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    server
        .get("/programs")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    server
        .get("/students")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    let response = server
        .post("/colleges")
        .json(&json!({"college_code": "CCS", "college_name": "Computer Studies"}))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    // Nothing was written
    let token = admin_token(&server).await;
    let body: Value = bearer(server.get("/colleges"), &token).await.json();
    assert_eq!(body["colleges"].as_array().unwrap().len(), 0);
}

// ============================================================================
// Colleges
// ============================================================================

#[tokio::test]
async fn test_end_to_end_counts() {
    let (server, _db) = create_test_server().await;
    let token = admin_token(&server).await;

    let response = bearer(server.post("/colleges"), &token)
        .json(&json!({
            "college_code": "CCS",
            "college_name": "college of computer studies"
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["college"]["college_name"], "College Of Computer Studies");
    let college_id = body["college"]["id"].as_i64().unwrap();

    let body: Value = bearer(server.get("/colleges"), &token).await.json();
    assert_eq!(body["colleges"][0]["num_programs"], 0);
    assert_eq!(body["colleges"][0]["num_students"], 0);

    let program_id =
        create_program(&server, &token, "BSCS", "computer science", college_id).await;
    bearer(server.post("/students"), &token)
        .json(&student_json("2025-0001", Some(program_id)))
        .await
        .assert_status(StatusCode::CREATED);

    let body: Value = bearer(server.get("/colleges"), &token).await.json();
    assert_eq!(body["colleges"][0]["num_programs"], 1);
    assert_eq!(body["colleges"][0]["num_students"], 1);

    let body: Value = bearer(server.get("/programs"), &token).await.json();
    assert_eq!(body["programs"][0]["college_name"], "College Of Computer Studies");
    assert_eq!(body["programs"][0]["num_students"], 1);
}

#[tokio::test]
async fn test_create_college_invalid_name() {
    let (server, _db) = create_test_server().await;
    let token = admin_token(&server).await;

    let response = bearer(server.post("/colleges"), &token)
        .json(&json!({"college_code": "CCS", "college_name": "College 42"}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "VALIDATION_FAILED");
    assert!(body["error"]["details"]["college_name"].is_array());
}

#[tokio::test]
async fn test_create_college_duplicate_name_any_case() {
    let (server, _db) = create_test_server().await;
    let token = admin_token(&server).await;

    create_college(&server, &token, "CCS", "Computer Studies").await;

    let response = bearer(server.post("/colleges"), &token)
        .json(&json!({"college_code": "CS", "college_name": "COMPUTER STUDIES"}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"]["code"], "DUPLICATE_NAME");
}

#[tokio::test]
async fn test_update_college_keeps_own_name() {
    let (server, _db) = create_test_server().await;
    let token = admin_token(&server).await;

    let id = create_college(&server, &token, "CCS", "Computer Studies").await;

    let response = bearer(server.put(&format!("/colleges/{}", id)), &token)
        .json(&json!({"college_code": "CCS", "college_name": "computer studies"}))
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>()["college"]["college_name"],
        "Computer Studies"
    );
}

#[tokio::test]
async fn test_update_missing_college() {
    let (server, _db) = create_test_server().await;
    let token = admin_token(&server).await;

    let response = bearer(server.put("/colleges/999"), &token)
        .json(&json!({"college_code": "CCS", "college_name": "Computer Studies"}))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_delete_college_unlinks_programs() {
    let (server, _db) = create_test_server().await;
    let token = admin_token(&server).await;

    let college_id = create_college(&server, &token, "CCS", "Computer Studies").await;
    let program_id =
        create_program(&server, &token, "BSCS", "Computer Science", college_id).await;
    bearer(server.post("/students"), &token)
        .json(&student_json("2025-0001", Some(program_id)))
        .await
        .assert_status(StatusCode::CREATED);

    let response = bearer(server.delete(&format!("/colleges/{}", college_id)), &token).await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "College 'CCS' deleted successfully");

    bearer(server.get(&format!("/colleges/{}", college_id)), &token)
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let response = bearer(server.get(&format!("/programs/{}", program_id)), &token).await;
    response.assert_status_ok();
    assert!(response.json::<Value>()["college_id"].is_null());

    let response = bearer(server.get("/students/2025-0001"), &token).await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert!(body["college_id"].is_null());
    assert_eq!(body["program_id"], program_id);
}

#[tokio::test]
async fn test_delete_missing_college() {
    let (server, _db) = create_test_server().await;
    let token = admin_token(&server).await;

    bearer(server.delete("/colleges/42"), &token)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

// ============================================================================
// Programs
// ============================================================================

#[tokio::test]
async fn test_create_program_requires_college() {
    let (server, _db) = create_test_server().await;
    let token = admin_token(&server).await;

    let response = bearer(server.post("/programs"), &token)
        .json(&json!({"program_code": "BSCS", "program_name": "Computer Science"}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.json::<Value>()["error"]["details"]["college_id"].is_array());

    let response = bearer(server.post("/programs"), &token)
        .json(&json!({
            "program_code": "BSCS",
            "program_name": "Computer Science",
            "college_id": 999
        }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_program_unlinks_students() {
    let (server, _db) = create_test_server().await;
    let token = admin_token(&server).await;

    let college_id = create_college(&server, &token, "CCS", "Computer Studies").await;
    let program_id =
        create_program(&server, &token, "BSCS", "Computer Science", college_id).await;
    bearer(server.post("/students"), &token)
        .json(&student_json("2025-0001", Some(program_id)))
        .await
        .assert_status(StatusCode::CREATED);

    bearer(server.delete(&format!("/programs/{}", program_id)), &token)
        .await
        .assert_status_ok();

    let body: Value = bearer(server.get("/students/2025-0001"), &token)
        .await
        .json();
    assert!(body["program_id"].is_null());
    assert_eq!(body["college_id"], college_id);

    let body: Value = bearer(server.get("/colleges"), &token).await.json();
    assert_eq!(body["colleges"][0]["num_programs"], 0);
}

// ============================================================================
// Students
// ============================================================================

#[tokio::test]
async fn test_moving_program_moves_its_students() {
    let (server, _db) = create_test_server().await;
    let token = admin_token(&server).await;

    let ccs = create_college(&server, &token, "CCS", "Computer Studies").await;
    let coe = create_college(&server, &token, "COE", "Engineering").await;
    let program_id = create_program(&server, &token, "BSCS", "Computer Science", ccs).await;
    bearer(server.post("/students"), &token)
        .json(&student_json("2025-0001", Some(program_id)))
        .await
        .assert_status(StatusCode::CREATED);

    bearer(server.put(&format!("/programs/{}", program_id)), &token)
        .json(&json!({
            "program_code": "BSCS",
            "program_name": "Computer Science",
            "college_id": coe
        }))
        .await
        .assert_status_ok();

    let student: Value = bearer(server.get("/students/2025-0001"), &token)
        .await
        .json();
    assert_eq!(student["college_id"], coe);

    let body: Value = bearer(server.get("/students"), &token).await.json();
    assert_eq!(body["students"][0]["college_name"], "Engineering");

    let body: Value = bearer(server.get("/colleges"), &token).await.json();
    assert_eq!(body["colleges"][0]["college_code"], "CCS");
    assert_eq!(body["colleges"][0]["num_students"], 0);
    assert_eq!(body["colleges"][1]["college_code"], "COE");
    assert_eq!(body["colleges"][1]["num_students"], 1);

    // Saving the student back unchanged is still consistent
    let mut payload = student_json("2025-0001", Some(program_id));
    payload["college_id"] = student["college_id"].clone();
    bearer(server.put("/students/2025-0001"), &token)
        .json(&payload)
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_malformed_path_id_is_json_error() {
    let (server, _db) = create_test_server().await;
    let token = admin_token(&server).await;

    for path in ["/colleges/abc", "/programs/abc"] {
        let response = bearer(server.get(path), &token).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["error"]["code"], "BAD_REQUEST");
    }
}

#[tokio::test]
async fn test_create_student_malformed_id_number() {
    let (server, _db) = create_test_server().await;
    let token = admin_token(&server).await;

    let response = bearer(server.post("/students"), &token)
        .json(&student_json("20251", None))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "VALIDATION_FAILED");
    assert!(body["error"]["details"]["id_number"].is_array());
}

#[tokio::test]
async fn test_create_student_duplicate_id_number() {
    let (server, _db) = create_test_server().await;
    let token = admin_token(&server).await;

    bearer(server.post("/students"), &token)
        .json(&student_json("2025-0001", None))
        .await
        .assert_status(StatusCode::CREATED);

    let response = bearer(server.post("/students"), &token)
        .json(&student_json("2025-0001", None))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"]["code"], "DUPLICATE_NAME");
}

#[tokio::test]
async fn test_student_college_inferred_from_program() {
    let (server, _db) = create_test_server().await;
    let token = admin_token(&server).await;

    let college_id = create_college(&server, &token, "CCS", "Computer Studies").await;
    let program_id =
        create_program(&server, &token, "BSCS", "Computer Science", college_id).await;

    let response = bearer(server.post("/students"), &token)
        .json(&student_json("2025-0001", Some(program_id)))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["student"]["college_id"], college_id);
    assert_eq!(body["student"]["first_name"], "Juan");
    assert_eq!(body["student"]["last_name"], "Dela Cruz");

    let body: Value = bearer(server.get("/students"), &token).await.json();
    assert_eq!(body["students"][0]["program_code"], "BSCS");
    assert_eq!(body["students"][0]["college_name"], "Computer Studies");
}

#[tokio::test]
async fn test_student_program_college_mismatch() {
    let (server, _db) = create_test_server().await;
    let token = admin_token(&server).await;

    let ccs = create_college(&server, &token, "CCS", "Computer Studies").await;
    let coe = create_college(&server, &token, "COE", "Engineering").await;
    let program_id = create_program(&server, &token, "BSCS", "Computer Science", ccs).await;

    let mut payload = student_json("2025-0001", Some(program_id));
    payload["college_id"] = json!(coe);

    let response = bearer(server.post("/students"), &token)
        .json(&payload)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.json::<Value>()["error"]["details"]["program_id"].is_array());
}

#[tokio::test]
async fn test_update_student_changes_id_number() {
    let (server, _db) = create_test_server().await;
    let token = admin_token(&server).await;

    bearer(server.post("/students"), &token)
        .json(&student_json("2025-0001", None))
        .await
        .assert_status(StatusCode::CREATED);

    let mut payload = student_json("2025-0002", None);
    payload["year_level"] = json!("4+");

    let response = bearer(server.put("/students/2025-0001"), &token)
        .json(&payload)
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["student"]["year_level"], "4+");

    bearer(server.get("/students/2025-0001"), &token)
        .await
        .assert_status(StatusCode::NOT_FOUND);
    bearer(server.get("/students/2025-0002"), &token)
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_update_missing_student() {
    let (server, _db) = create_test_server().await;
    let token = admin_token(&server).await;

    let response = bearer(server.put("/students/2025-9999"), &token)
        .json(&student_json("2025-9999", None))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_student() {
    let (server, _db) = create_test_server().await;
    let token = admin_token(&server).await;

    bearer(server.post("/students"), &token)
        .json(&student_json("2025-0001", None))
        .await
        .assert_status(StatusCode::CREATED);

    let response = bearer(server.delete("/students/2025-0001"), &token).await;
    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>()["message"],
        "Student '2025-0001' deleted successfully"
    );

    bearer(server.delete("/students/2025-0001"), &token)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_student_filters() {
    let (server, _db) = create_test_server().await;
    let token = admin_token(&server).await;

    let mut second = student_json("2025-0002", None);
    second["gender"] = json!("female");
    second["year_level"] = json!("3");

    for payload in [student_json("2025-0001", None), second] {
        bearer(server.post("/students"), &token)
            .json(&payload)
            .await
            .assert_status(StatusCode::CREATED);
    }

    let response = bearer(server.get("/students/filters"), &token).await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["year_levels"], json!(["1", "3"]));
    assert_eq!(body["genders"], json!(["Female", "Male"]));
}
