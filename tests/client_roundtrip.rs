//! Client Tests Against a Live Server
//!
//! Starts the HTTP server on an ephemeral port and drives it with the
//! blocking client and the interactive shell.

use std::io::Cursor;
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;

use recordstore::cli::{send_action, ClientAction};
use recordstore::client::{ApiClient, Payload, RecordApi, Shell};
use recordstore::http_server::{HttpServer, HttpServerConfig};
use recordstore::store::{JsonFileStore, Record, RecordPatch, RecordStore, SqliteStore};
use tempfile::TempDir;
use tokio::net::TcpListener;

// =============================================================================
// Test Utilities
// =============================================================================

/// Serve `store` on 127.0.0.1 from a background thread, return the base URL
fn spawn_server(store: Arc<dyn RecordStore>) -> String {
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let rt = tokio::runtime::Runtime::new().expect("Failed to create runtime");
        rt.block_on(async move {
            let listener = TcpListener::bind("127.0.0.1:0").await.expect("Failed to bind");
            tx.send(listener.local_addr().expect("No local addr")).unwrap();
            HttpServer::new(HttpServerConfig::default(), store)
                .serve(listener)
                .await
                .expect("Server failed");
        });
    });

    format!("http://{}", rx.recv().expect("Server did not start"))
}

/// Address of a port that was bound and released, so nothing listens on it
fn closed_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

fn json_client(temp: &TempDir) -> ApiClient {
    let store = Arc::new(JsonFileStore::new(temp.path().join("data.json")));
    ApiClient::new(spawn_server(store)).unwrap()
}

fn sqlite_client(temp: &TempDir) -> ApiClient {
    let store = Arc::new(
        SqliteStore::open(temp.path().join("database.db"), temp.path().join("export.json"))
            .unwrap(),
    );
    ApiClient::new(spawn_server(store)).unwrap()
}

// =============================================================================
// ApiClient
// =============================================================================

#[test]
fn test_client_crud_round_trip() {
    let temp = TempDir::new().unwrap();
    let client = json_client(&temp);

    let created = client.insert("a", "1").unwrap();
    assert_eq!(created.status, 201);
    assert_eq!(created.payload, Payload::Record(Record::new(1, "a", "1")));

    let updated = client.update(1, &RecordPatch::value("9")).unwrap();
    assert_eq!(updated.payload, Payload::Record(Record::new(1, "a", "9")));

    let listed = client.select_all().unwrap();
    assert_eq!(listed.payload, Payload::Records(vec![Record::new(1, "a", "9")]));

    let deleted = client.delete(1).unwrap();
    assert_eq!(
        deleted.payload,
        Payload::Deleted {
            message: "Object deleted successfully".to_string(),
            deleted: Record::new(1, "a", "9"),
        }
    );

    let missing = client.select_one(1).unwrap();
    assert_eq!(missing.status, 404);
    assert_eq!(missing.payload.to_string(), "Error: Object not found");
}

#[test]
fn test_client_export_per_backend() {
    let temp = TempDir::new().unwrap();

    let sqlite = sqlite_client(&temp);
    sqlite.insert("a", "1").unwrap();
    let exported = sqlite.export().unwrap();
    assert!(exported.is_success());
    assert!(temp.path().join("export.json").exists());

    let json = json_client(&temp);
    let refused = json.export().unwrap();
    assert_eq!(refused.status, 404);
    assert!(matches!(refused.payload, Payload::Error(_)));
}

#[test]
fn test_one_shot_actions() {
    let temp = TempDir::new().unwrap();
    let client = sqlite_client(&temp);

    let response = send_action(
        &client,
        ClientAction::Insert {
            name: "a".to_string(),
            value: "1".to_string(),
        },
    )
    .unwrap();
    assert_eq!(response.payload.to_string(), "ID: 1\nName: a\nValue: 1");

    let response = send_action(
        &client,
        ClientAction::Update {
            id: 1,
            name: Some("b".to_string()),
            value: None,
        },
    )
    .unwrap();
    assert_eq!(response.payload.to_string(), "ID: 1\nName: b\nValue: 1");
}

// =============================================================================
// Shell
// =============================================================================

#[test]
fn test_shell_session() {
    let temp = TempDir::new().unwrap();
    let client = sqlite_client(&temp);

    // add a/1, add b/2, update 1 value only, show 1, delete 2, list, export, quit
    let input = "1\na\n1\n1\nb\n2\n4\n1\n\n9\n3\n1\n5\n2\n2\n6\nq\n";
    let mut output = Vec::new();
    Shell::new(&client, Cursor::new(input.as_bytes()), &mut output)
        .run()
        .unwrap();
    let output = String::from_utf8(output).unwrap();

    assert!(output.contains("ID: 2\nName: b\nValue: 2"));
    assert!(output.contains("ID: 1\nName: a\nValue: 9"));
    assert!(output.contains("Object deleted successfully\n\nDeleted record:\nID: 2"));
    assert!(output.contains("Data exported to JSON successfully."));

    let remaining = client.select_all().unwrap();
    assert_eq!(remaining.payload, Payload::Records(vec![Record::new(1, "a", "9")]));
}

#[test]
fn test_shell_survives_transport_error() {
    let client = ApiClient::new(closed_url()).unwrap();

    let mut output = Vec::new();
    Shell::new(&client, Cursor::new(b"2\n2\nq\n".as_slice()), &mut output)
        .run()
        .unwrap();
    let output = String::from_utf8(output).unwrap();

    assert_eq!(output.matches("Error: Request failed").count(), 2);
}
