//! Record assembler
//!
//! Runs one debrief operation end to end. Write operations go through:
//!
//! 1. Parse the raw body (rejects missing or mis-shaped bodies)
//! 2. Require the acting user's identity
//! 3. Extract the section document and lesson texts
//! 4. Classification round trip (the only suspension point before persistence)
//! 5. Normalize timestamps
//! 6. Merge labels and per-lesson clusters
//! 7. Completeness validation
//! 8. Identity reset (create: everything; update: per [`UpdateIdPolicy`])
//! 9. Hand off to the persistence gateway
//!
//! Nothing is retried and nothing is shared between requests: any failure
//! aborts the operation before the gateway is called, or is the gateway's own.

use std::future::Future;
use std::sync::Arc;

use debrief_common::config::{ServiceConfig, UpdateIdPolicy};
use debrief_common::enrichment::apply_enrichment;
use debrief_common::identity::{clear_descendant_identities, clear_identities};
use debrief_common::model::{DebriefInput, Task};
use debrief_common::sections::{extract_sections, lesson_texts};
use debrief_common::timestamp::{format_record_dates, format_task_dates};
use debrief_common::validate::{ensure_complete, log_input_fields};
use debrief_common::{Error, Result};
use serde_json::Value;
use tracing::{error, info, info_span, Instrument};
use uuid::Uuid;

use super::{LabelClassifier, PersistenceGateway};

/// Orchestrates normalization, enrichment and persistence of debriefs
pub struct RecordAssembler {
    classifier: Arc<dyn LabelClassifier>,
    gateway: Arc<dyn PersistenceGateway>,
    section_names: Vec<String>,
    update_policy: UpdateIdPolicy,
}

impl RecordAssembler {
    pub fn new(
        classifier: Arc<dyn LabelClassifier>,
        gateway: Arc<dyn PersistenceGateway>,
        section_names: Vec<String>,
        update_policy: UpdateIdPolicy,
    ) -> Self {
        Self {
            classifier,
            gateway,
            section_names,
            update_policy,
        }
    }

    pub fn from_config(
        classifier: Arc<dyn LabelClassifier>,
        gateway: Arc<dyn PersistenceGateway>,
        config: &ServiceConfig,
    ) -> Self {
        Self::new(
            classifier,
            gateway,
            config.section_names.clone(),
            config.update_descendant_ids,
        )
    }

    /// Create a new debrief from a raw body
    pub async fn create(&self, body: &[u8], user_id: Option<&str>) -> Result<Value> {
        let span = info_span!("create_debrief", request_id = %Uuid::new_v4());
        logged("creating debrief", async {
            let mut record = DebriefInput::from_json(body)?;
            let user_id = require_identity(user_id)?;

            self.prepare(&mut record).await?;
            clear_identities(&mut record);

            self.gateway.create_record(&record, user_id).await
        })
        .instrument(span)
        .await
    }

    /// Replace the debrief identified by `id` (taken from the path, not the body)
    pub async fn update(&self, id: &str, body: &[u8], user_id: Option<&str>) -> Result<Value> {
        let span = info_span!("update_debrief", request_id = %Uuid::new_v4(), id = %id);
        logged("updating debrief", async {
            let id = require_id(id)?;
            let mut record = DebriefInput::from_json(body)?;
            let user_id = require_identity(user_id)?;

            self.prepare(&mut record).await?;
            if self.update_policy == UpdateIdPolicy::Clear {
                clear_descendant_identities(&mut record);
            }
            record.id = Some(id.to_string());

            self.gateway.update_record(&record, user_id).await
        })
        .instrument(span)
        .await
    }

    pub async fn delete(&self, id: &str) -> Result<bool> {
        let span = info_span!("delete_debrief", request_id = %Uuid::new_v4(), id = %id);
        logged("deleting debrief", async {
            let id = require_id(id)?;
            self.gateway.delete_record(id).await
        })
        .instrument(span)
        .await
    }

    pub async fn get(&self, id: &str) -> Result<Value> {
        let span = info_span!("get_debrief", request_id = %Uuid::new_v4(), id = %id);
        logged("fetching debrief", async {
            let id = require_id(id)?;
            self.gateway.get_record(id).await
        })
        .instrument(span)
        .await
    }

    pub async fn get_all(&self) -> Result<Value> {
        let span = info_span!("get_all_debriefs", request_id = %Uuid::new_v4());
        logged("fetching all debriefs", self.gateway.get_all_records())
            .instrument(span)
            .await
    }

    /// Mark the task identified by `id` as completed
    ///
    /// No enrichment; the task's timestamps are normalized like a record's.
    pub async fn complete_task(&self, id: &str, body: &[u8], user_id: Option<&str>) -> Result<bool> {
        let span = info_span!("complete_task", request_id = %Uuid::new_v4(), id = %id);
        logged("completing task", async {
            let id = require_id(id)?;
            let mut task: Task = serde_json::from_slice(body)
                .map_err(|e| Error::InvalidInput(format!("Invalid request body: {}", e)))?;
            let user_id = require_identity(user_id)?;

            task.id = Some(id.to_string());
            task.completed = true;
            format_task_dates(&mut task);

            self.gateway.complete_task(&task, user_id).await
        })
        .instrument(span)
        .await
    }

    /// Enrichment, normalization and validation shared by create and update
    async fn prepare(&self, record: &mut DebriefInput) -> Result<()> {
        let document = extract_sections(record, self.section_names.as_slice());
        let lessons = lesson_texts(record);

        let enrichment = self.classifier.classify(&document, &lessons).await?;

        format_record_dates(record);
        apply_enrichment(record, enrichment)?;

        log_input_fields(record, "Debrief input fields");
        ensure_complete(record)
    }
}

/// Log the start of an operation and any failure before propagating it
async fn logged<T, F>(operation: &str, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    info!("{}", operation);
    let result = fut.await;
    if let Err(e) = &result {
        error!("Error {}: {}", operation, e);
    }
    result
}

fn require_identity(user_id: Option<&str>) -> Result<&str> {
    user_id
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or(Error::MissingIdentity)
}

fn require_id(id: &str) -> Result<&str> {
    let id = id.trim();
    if id.is_empty() {
        return Err(Error::InvalidInput("Missing ID parameter".to_string()));
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_identity() {
        assert_eq!(require_identity(Some("u-1")).unwrap(), "u-1");
        assert!(matches!(require_identity(None), Err(Error::MissingIdentity)));
        assert!(matches!(require_identity(Some("  ")), Err(Error::MissingIdentity)));
    }

    #[test]
    fn test_require_id() {
        assert_eq!(require_id(" d-1 ").unwrap(), "d-1");
        assert!(matches!(require_id(""), Err(Error::InvalidInput(_))));
    }
}
