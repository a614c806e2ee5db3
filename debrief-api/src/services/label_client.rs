//! Classification service client
//!
//! Sends the extracted section document plus every lesson's text to
//! `POST {base}/predict` and reads back predicted tags for the document and
//! one cluster name per lesson.
//!
//! **Wire format:**
//! - Request: `{ "texts": [document], "lessons": [lesson, ...] }`
//! - Response: `{ "tag_predictions": [{ "predicted_tags": [...] }],
//!   "clustering_results": { "cluster_name": [...] } }`
//!
//! Cluster names correspond to lessons by position only, so the response
//! length is checked against the request before anything is merged.

use async_trait::async_trait;
use debrief_common::enrichment::Enrichment;
use debrief_common::{Error, Result};
use serde::{Deserialize, Serialize};

/// Source of tag and cluster predictions
#[async_trait]
pub trait LabelClassifier: Send + Sync {
    /// Predict tags for `document` and a cluster for each entry of `lesson_texts`
    ///
    /// On success `clusters.len() == lesson_texts.len()`.
    async fn classify(&self, document: &str, lesson_texts: &[String]) -> Result<Enrichment>;
}

#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    texts: [&'a str; 1],
    lessons: &'a [String],
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    tag_predictions: Vec<TagPrediction>,
    #[serde(default)]
    clustering_results: ClusteringResults,
}

#[derive(Debug, Deserialize)]
struct TagPrediction {
    #[serde(default)]
    predicted_tags: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ClusteringResults {
    #[serde(default)]
    cluster_name: Vec<String>,
}

impl PredictResponse {
    fn into_enrichment(self, lesson_count: usize) -> Result<Enrichment> {
        // One document per request, so one prediction set is expected back
        let tags = self
            .tag_predictions
            .into_iter()
            .next()
            .map(|p| p.predicted_tags)
            .ok_or_else(|| Error::Enrichment("Response has no tag predictions".to_string()))?;

        let clusters = self.clustering_results.cluster_name;
        if clusters.len() != lesson_count {
            return Err(Error::ClusterCountMismatch {
                expected: lesson_count,
                actual: clusters.len(),
            });
        }

        Ok(Enrichment { tags, clusters })
    }
}

/// HTTP implementation of [`LabelClassifier`]
pub struct HttpLabelClient {
    http_client: reqwest::Client,
    predict_url: String,
}

impl HttpLabelClient {
    /// Create a client for the service at `base_url`
    pub fn new(base_url: &str, http_client: reqwest::Client) -> Self {
        Self {
            http_client,
            predict_url: format!("{}/predict", base_url.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl LabelClassifier for HttpLabelClient {
    async fn classify(&self, document: &str, lesson_texts: &[String]) -> Result<Enrichment> {
        let request = PredictRequest {
            texts: [document],
            lessons: lesson_texts,
        };

        tracing::debug!(
            url = %self.predict_url,
            document_len = document.len(),
            lessons = lesson_texts.len(),
            "Requesting label predictions"
        );

        let response = self
            .http_client
            .post(&self.predict_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Error sending text to classification service: {}", e);
                Error::Enrichment(format!("Network error: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Error calling classification service: {} {}", status, error_text);
            return Err(Error::Enrichment(format!(
                "Classification service returned {}: {}",
                status.as_u16(),
                error_text
            )));
        }

        let predictions: PredictResponse = response
            .json()
            .await
            .map_err(|e| Error::Enrichment(format!("Parse error: {}", e)))?;

        let enrichment = predictions.into_enrichment(lesson_texts.len())?;

        tracing::info!(
            tags = enrichment.tags.len(),
            clusters = enrichment.clusters.len(),
            "Label prediction successful"
        );

        Ok(enrichment)
    }
}
