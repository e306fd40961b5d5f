//! Concurrency tests for SSIS.
//!
//! These tests run against a file-backed database so the pool hands out
//! several connections and writes really race.

use std::sync::Arc;

use ssis::auth::{RevocationSet, TokenError, TokenIssuer};
use ssis::college::{CollegeInput, CollegeService};
use ssis::program::{ProgramInput, ProgramService};
use ssis::student::{StudentInput, StudentService};
use ssis::{Database, SsisError};

/// Open a fresh file-backed database; the directory must outlive the test.
async fn setup_test_db() -> (Arc<Database>, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::open(dir.path().join("ssis.db")).await.unwrap();
    (Arc::new(db), dir)
}

fn student(id_number: &str, program_id: Option<i64>) -> StudentInput {
    StudentInput {
        id_number: id_number.to_string(),
        last_name: "Dela Cruz".to_string(),
        first_name: "Juan".to_string(),
        gender: "Male".to_string(),
        year_level: "2".to_string(),
        program_id,
        ..Default::default()
    }
}

/// Only one of several concurrent creates with the same id number succeeds;
/// the rest report a duplicate rather than a storage failure.
#[tokio::test]
async fn test_concurrent_duplicate_student() {
    let (db, _dir) = setup_test_db().await;

    const NUM_TASKS: usize = 8;

    let mut handles = Vec::new();
    for _ in 0..NUM_TASKS {
        let db = Arc::clone(&db);
        handles.push(tokio::spawn(async move {
            StudentService::new(&db)
                .create(&student("2025-0001", None))
                .await
        }));
    }

    let mut created = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => created += 1,
            Err(SsisError::DuplicateName(_)) => {}
            Err(e) => panic!("unexpected error: {e}"),
        }
    }
    assert_eq!(created, 1);
}

/// Counts stay consistent with concurrent enrollment.
#[tokio::test]
async fn test_concurrent_enrollment_counts() {
    let (db, _dir) = setup_test_db().await;

    let college = CollegeService::new(&db)
        .create(&CollegeInput::new("CCS", "Computer Studies"))
        .await
        .unwrap();
    let program = ProgramService::new(&db)
        .create(&ProgramInput::new("BSCS", "Computer Science", college.id))
        .await
        .unwrap();

    const NUM_STUDENTS: usize = 10;

    let mut handles = Vec::new();
    for i in 0..NUM_STUDENTS {
        let db = Arc::clone(&db);
        let program_id = program.id;
        handles.push(tokio::spawn(async move {
            StudentService::new(&db)
                .create(&student(&format!("2025-{:04}", i), Some(program_id)))
                .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let colleges = CollegeService::new(&db).list().await.unwrap();
    assert_eq!(colleges[0].num_programs, 1);
    assert_eq!(colleges[0].num_students, NUM_STUDENTS as i64);
}

/// Deleting a college while students are being added never leaves a student
/// pointing at the deleted college.
#[tokio::test]
async fn test_concurrent_delete_and_create() {
    let (db, _dir) = setup_test_db().await;

    let college = CollegeService::new(&db)
        .create(&CollegeInput::new("CCS", "Computer Studies"))
        .await
        .unwrap();
    let program = ProgramService::new(&db)
        .create(&ProgramInput::new("BSCS", "Computer Science", college.id))
        .await
        .unwrap();

    let mut handles = Vec::new();
    for i in 0..5 {
        let db = Arc::clone(&db);
        let program_id = program.id;
        handles.push(tokio::spawn(async move {
            let _ = StudentService::new(&db)
                .create(&student(&format!("2025-{:04}", i), Some(program_id)))
                .await;
        }));
    }

    CollegeService::new(&db).delete(college.id).await.unwrap();
    for handle in handles {
        handle.await.unwrap();
    }

    let dangling: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM students WHERE college_id = ?")
            .bind(college.id)
            .fetch_one(db.pool())
            .await
            .unwrap();
    assert_eq!(dangling, 0);
}

/// A revocation made by one task is seen by verification in every other.
#[tokio::test]
async fn test_revocation_visible_across_tasks() {
    let issuer = Arc::new(TokenIssuer::new(
        "test-secret",
        300,
        Arc::new(RevocationSet::new()),
    ));

    let tokens: Vec<String> = (0..10)
        .map(|i| issuer.issue(i).unwrap().value)
        .collect();

    let mut handles = Vec::new();
    for token in tokens.iter().cloned() {
        let issuer = Arc::clone(&issuer);
        handles.push(tokio::spawn(async move { issuer.revoke(&token) }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let mut handles = Vec::new();
    for token in tokens {
        let issuer = Arc::clone(&issuer);
        handles.push(tokio::spawn(async move { issuer.verify(&token) }));
    }
    for handle in handles {
        assert_eq!(handle.await.unwrap(), Err(TokenError::Revoked));
    }
}
