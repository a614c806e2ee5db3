//! Persistence gateway over GraphQL
//!
//! Each logical action is exactly one GraphQL request. Create, update and
//! task updates carry the acting user in a `user-id` header; deletes and
//! reads carry none. The payload under `data.<operation>` is returned
//! unchanged.

use async_trait::async_trait;
use debrief_common::model::{DebriefInput, Task};
use debrief_common::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::queries;
use crate::api::USER_ID_HEADER;

/// System of record for debriefs
#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    async fn create_record(&self, input: &DebriefInput, user_id: &str) -> Result<Value>;
    async fn update_record(&self, input: &DebriefInput, user_id: &str) -> Result<Value>;
    async fn delete_record(&self, id: &str) -> Result<bool>;
    async fn get_record(&self, id: &str) -> Result<Value>;
    async fn get_all_records(&self) -> Result<Value>;
    /// Persist a task update; returns the stored `completed` flag
    async fn complete_task(&self, task: &Task, user_id: &str) -> Result<bool>;
}

#[derive(Debug, Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: Value,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

impl GraphQlResponse {
    /// Extract `data.<field>`, turning GraphQL errors into a persistence failure
    fn into_field(self, field: &str) -> Result<Value> {
        if let Some(errors) = self.errors.filter(|e| !e.is_empty()) {
            let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
            return Err(Error::Persistence(messages.join("; ")));
        }

        self.data
            .and_then(|mut data| data.get_mut(field).map(Value::take))
            .ok_or_else(|| Error::Persistence(format!("Response has no data.{}", field)))
    }
}

/// GraphQL implementation of [`PersistenceGateway`]
pub struct GraphQlGateway {
    http_client: reqwest::Client,
    endpoint: String,
}

impl GraphQlGateway {
    pub fn new(endpoint: &str, http_client: reqwest::Client) -> Self {
        Self {
            http_client,
            endpoint: endpoint.to_string(),
        }
    }

    /// Run one query or mutation and return `data.<field>`
    async fn execute(
        &self,
        query: &str,
        variables: Value,
        user_id: Option<&str>,
        field: &str,
    ) -> Result<Value> {
        let mut request = self
            .http_client
            .post(&self.endpoint)
            .json(&GraphQlRequest { query, variables });

        if let Some(user_id) = user_id {
            request = request.header(USER_ID_HEADER, user_id);
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!("GraphQL request failed: {}", e);
            Error::Persistence(format!("Failed to fetch data from GraphQL server: {}", e))
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(%status, "GraphQL request failed: {}", error_text);
            return Err(Error::Persistence(format!(
                "GraphQL server returned {}: {}",
                status.as_u16(),
                error_text
            )));
        }

        let body: GraphQlResponse = response
            .json()
            .await
            .map_err(|e| Error::Persistence(format!("Invalid GraphQL response: {}", e)))?;

        body.into_field(field)
    }

    fn input_variables<T: Serialize>(input: &T) -> Result<Value> {
        let input = serde_json::to_value(input)
            .map_err(|e| Error::Persistence(format!("Failed to encode input: {}", e)))?;
        Ok(json!({ "input": input }))
    }
}

#[async_trait]
impl PersistenceGateway for GraphQlGateway {
    async fn create_record(&self, input: &DebriefInput, user_id: &str) -> Result<Value> {
        let variables = Self::input_variables(input)?;
        self.execute(queries::CREATE_DEBRIEF, variables, Some(user_id), "createDebrief")
            .await
    }

    async fn update_record(&self, input: &DebriefInput, user_id: &str) -> Result<Value> {
        let variables = Self::input_variables(input)?;
        self.execute(queries::UPDATE_DEBRIEF, variables, Some(user_id), "updateDebrief")
            .await
    }

    async fn delete_record(&self, id: &str) -> Result<bool> {
        let deleted = self
            .execute(queries::DELETE_DEBRIEF, json!({ "id": id }), None, "deleteDebrief")
            .await?;
        deleted
            .as_bool()
            .ok_or_else(|| Error::Persistence(format!("deleteDebrief returned {}", deleted)))
    }

    async fn get_record(&self, id: &str) -> Result<Value> {
        self.execute(queries::GET_DEBRIEF, json!({ "id": id }), None, "debriefs")
            .await
    }

    async fn get_all_records(&self) -> Result<Value> {
        self.execute(queries::GET_ALL_DEBRIEFS, json!({}), None, "getAllDebriefs")
            .await
    }

    async fn complete_task(&self, task: &Task, user_id: &str) -> Result<bool> {
        let variables = Self::input_variables(task)?;
        let updated = self
            .execute(queries::UPDATE_TASK, variables, Some(user_id), "updateTask")
            .await?;
        updated
            .get("completed")
            .and_then(Value::as_bool)
            .ok_or_else(|| Error::Persistence("updateTask returned no completed flag".to_string()))
    }
}
