use async_trait::async_trait;
use httpmock::prelude::*;
use subscriber_relay::adapters::{FileResponseStore, LocalStorage};
use subscriber_relay::domain::model::{ResponseRecord, Settings};
use subscriber_relay::domain::ports::ResponseStore;
use subscriber_relay::utils::error::{RelayError, Result};
use subscriber_relay::RelayEngine;
use tempfile::TempDir;

const HEADER: &str = "Firstname,Surname,email,displayname,dateofbirth,KE,Secondary,mobile";

fn csv_with_rows(rows: &[&str]) -> String {
    let mut text = String::from(HEADER);
    for row in rows {
        text.push('\n');
        text.push_str(row);
    }
    text
}

fn settings(url: String) -> Settings {
    Settings {
        webhook_url: url,
        auth_token: "test-token".to_string(),
    }
}

#[tokio::test]
async fn end_to_end_batch_dispatches_and_persists() {
    let temp_dir = TempDir::new().unwrap();
    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());

    let server = MockServer::start();
    let hook = server.mock(|when, then| {
        when.method(POST)
            .path("/hook")
            .header("X-Advanta-Token", "test-token");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"message": "Queued"}));
    });

    let csv = csv_with_rows(&[
        "A,B,a@b.com,AB,2000-01-01,KE,Sec,+254700000000",
        "C,D,c@d.com,CD,1999-12-31,KE,Sec,", // no mobile: fails before dispatch
    ]);

    let engine = RelayEngine::new(FileResponseStore::new(storage.clone()));
    let result = engine
        .run(&csv, &settings(server.url("/hook")))
        .await
        .unwrap();

    assert_eq!(hook.hits(), 1);
    assert_eq!(result.success_count, 1);
    assert_eq!(result.failed_count, 1);
    assert_eq!(result.attempted(), 2);
    assert_eq!(
        result.errors,
        vec!["Record 2: Missing required field: mobile"]
    );

    let stored = FileResponseStore::new(storage).load().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].message, "Queued");
    assert_eq!(stored[0].data.mobile, "+254700000000");
}

#[tokio::test]
async fn later_batches_are_stored_newest_first() {
    let temp_dir = TempDir::new().unwrap();
    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/hook");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"message": "ok"}));
    });

    let engine = RelayEngine::new(FileResponseStore::new(storage.clone()));
    let config = settings(server.url("/hook"));

    let first = csv_with_rows(&["A,B,a@b.com,AB,2000-01-01,KE,Sec,+254700000001"]);
    engine.run(&first, &config).await.unwrap();

    let second = csv_with_rows(&["C,D,c@d.com,CD,1999-12-31,KE,Sec,+254700000002"]);
    engine.run(&second, &config).await.unwrap();

    let stored = FileResponseStore::new(storage).load().await.unwrap();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0].data.mobile, "+254700000002");
    assert_eq!(stored[1].data.mobile, "+254700000001");
}

#[tokio::test]
async fn parse_errors_abort_before_any_dispatch() {
    let temp_dir = TempDir::new().unwrap();
    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());

    let server = MockServer::start();
    let hook = server.mock(|when, then| {
        when.method(POST).path("/hook");
        then.status(200);
    });

    let engine = RelayEngine::new(FileResponseStore::new(storage.clone()));
    let err = engine
        .run(
            "Firstname,Surname\nA,B",
            &settings(server.url("/hook")),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, RelayError::MissingColumns { .. }));
    assert_eq!(hook.hits(), 0);

    let stored = FileResponseStore::new(storage).load().await.unwrap();
    assert!(stored.is_empty());
}

struct FailingResponseStore;

#[async_trait]
impl ResponseStore for FailingResponseStore {
    async fn load(&self) -> Result<Vec<ResponseRecord>> {
        Ok(Vec::new())
    }

    async fn prepend(&self, _responses: &[ResponseRecord]) -> Result<()> {
        Err(RelayError::Processing {
            message: "disk full".to_string(),
        })
    }

    async fn clear(&self) -> Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn persistence_failures_do_not_fail_the_batch() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/hook");
        then.status(200).body("accepted");
    });

    let csv = csv_with_rows(&["A,B,a@b.com,AB,2000-01-01,KE,Sec,+254700000000"]);
    let engine = RelayEngine::new(FailingResponseStore);
    let result = engine
        .run(&csv, &settings(server.url("/hook")))
        .await
        .unwrap();

    assert_eq!(result.success_count, 1);
    assert_eq!(result.failed_count, 0);
}
