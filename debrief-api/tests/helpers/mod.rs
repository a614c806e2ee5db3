//! Shared test helpers: mock collaborators and an in-process stub server

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use debrief_api::services::{LabelClassifier, PersistenceGateway, RecordAssembler};
use debrief_common::config::UpdateIdPolicy;
use debrief_common::enrichment::Enrichment;
use debrief_common::model::{DebriefInput, Task};
use debrief_common::{Error, Result};
use serde_json::{json, Value};

/// Classifier returning a canned response and recording every call
#[derive(Default)]
pub struct MockClassifier {
    pub response: Mutex<Option<Result<Enrichment>>>,
    pub calls: AtomicUsize,
    pub last_document: Mutex<Option<String>>,
    pub last_lessons: Mutex<Vec<String>>,
}

impl MockClassifier {
    pub fn returning(tags: &[&str], clusters: &[&str]) -> Arc<Self> {
        let enrichment = Enrichment {
            tags: tags.iter().map(|s| s.to_string()).collect(),
            clusters: clusters.iter().map(|s| s.to_string()).collect(),
        };
        Arc::new(Self {
            response: Mutex::new(Some(Ok(enrichment))),
            ..Default::default()
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            response: Mutex::new(Some(Err(Error::Enrichment(message.to_string())))),
            ..Default::default()
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LabelClassifier for MockClassifier {
    async fn classify(&self, document: &str, lesson_texts: &[String]) -> Result<Enrichment> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_document.lock().unwrap() = Some(document.to_string());
        *self.last_lessons.lock().unwrap() = lesson_texts.to_vec();

        match self.response.lock().unwrap().take() {
            Some(response) => response,
            None => Err(Error::Enrichment("no canned response left".to_string())),
        }
    }
}

/// Gateway recording every submitted record
#[derive(Default)]
pub struct MockGateway {
    pub calls: AtomicUsize,
    pub created: Mutex<Vec<(DebriefInput, String)>>,
    pub updated: Mutex<Vec<(DebriefInput, String)>>,
    pub deleted: Mutex<Vec<String>>,
    pub tasks: Mutex<Vec<(Task, String)>>,
    pub fail_with: Mutex<Option<String>>,
}

impl MockGateway {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            fail_with: Mutex::new(Some(message.to_string())),
            ..Default::default()
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record_call(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.fail_with.lock().unwrap().as_ref() {
            Some(message) => Err(Error::Persistence(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl PersistenceGateway for MockGateway {
    async fn create_record(&self, input: &DebriefInput, user_id: &str) -> Result<Value> {
        self.record_call()?;
        self.created
            .lock()
            .unwrap()
            .push((input.clone(), user_id.to_string()));
        Ok(json!({ "id": "new-debrief" }))
    }

    async fn update_record(&self, input: &DebriefInput, user_id: &str) -> Result<Value> {
        self.record_call()?;
        self.updated
            .lock()
            .unwrap()
            .push((input.clone(), user_id.to_string()));
        Ok(json!({ "id": input.id }))
    }

    async fn delete_record(&self, id: &str) -> Result<bool> {
        self.record_call()?;
        self.deleted.lock().unwrap().push(id.to_string());
        Ok(true)
    }

    async fn get_record(&self, id: &str) -> Result<Value> {
        self.record_call()?;
        Ok(json!([{ "id": id, "title": "Trip" }]))
    }

    async fn get_all_records(&self) -> Result<Value> {
        self.record_call()?;
        Ok(json!([{ "id": "d-1" }, { "id": "d-2" }]))
    }

    async fn complete_task(&self, task: &Task, user_id: &str) -> Result<bool> {
        self.record_call()?;
        self.tasks
            .lock()
            .unwrap()
            .push((task.clone(), user_id.to_string()));
        Ok(task.completed)
    }
}

pub fn assembler(
    classifier: &Arc<MockClassifier>,
    gateway: &Arc<MockGateway>,
    policy: UpdateIdPolicy,
) -> RecordAssembler {
    RecordAssembler::new(
        classifier.clone(),
        gateway.clone(),
        vec!["background".to_string()],
        policy,
    )
}

/// Inbound body used by the end-to-end scenarios
pub fn trip_body() -> Value {
    json!({
        "title": "Trip",
        "date": "2024-01-01T10:00",
        "contentItems": {
            "paragraphs": [{"name": "Background", "comments": [{"index": 0, "bullet": "Good weather"}]}],
            "tables": []
        },
        "lessons": [{"content": "lesson1", "tasks": []}],
        "tasks": []
    })
}

/// Serve `router` on an ephemeral local port; returns its base URL
pub async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}
