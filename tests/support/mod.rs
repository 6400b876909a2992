//! Shared harness for the HTTP suites: a freshly seeded server per test.

#![allow(dead_code)]

use notes_api::config::{Backend, StorageConfig};
use notes_api::entity::NewNote;
use notes_api::storage::open_store;
use notes_api::{NotesServer, NotesService, ServerHandle};
use serde_json::Value;
use tempfile::TempDir;

pub const FIRST_NOTE: &str = "Aprendiendo Fullstack con midudev";

/// Fixture notes seeded before every test, in insertion order.
pub fn initial_notes() -> Vec<NewNote> {
    vec![
        NewNote::new(FIRST_NOTE, true),
        NewNote::new("Sigueme en https://midu.tube", false),
    ]
}

pub struct TestApp {
    pub handle: ServerHandle,
    pub client: reqwest::Client,
    _tmp: TempDir,
}

impl TestApp {
    /// Open a store, clear it, seed the fixtures and start serving on an ephemeral port.
    pub async fn spawn(backend: Backend) -> Self {
        let tmp = TempDir::new().unwrap();
        let store = open_store(&StorageConfig {
            backend,
            data_dir: tmp.path().to_path_buf(),
        })
        .unwrap();
        let service = NotesService::new(store);

        service.reset().await.unwrap();
        for note in initial_notes() {
            service.create(note).await.unwrap();
        }

        let server = NotesServer::bind("127.0.0.1:0".parse().unwrap(), service)
            .await
            .unwrap();
        let handle = server.serve().unwrap();

        Self {
            handle,
            client: reqwest::Client::new(),
            _tmp: tmp,
        }
    }

    pub fn url(&self, path: &str) -> String {
        self.handle.url(path)
    }

    pub async fn get_notes(&self) -> Vec<Value> {
        let response = self.client.get(self.url("/api/notes")).send().await.unwrap();
        assert_eq!(response.status(), 200);
        response.json().await.unwrap()
    }

    pub async fn contents(&self) -> Vec<String> {
        self.get_notes()
            .await
            .iter()
            .map(|note| note["content"].as_str().unwrap().to_string())
            .collect()
    }

    /// Release the listener and the store.
    pub async fn teardown(self) {
        self.handle.shutdown().await.unwrap();
    }
}
