//! Outbound collaborators and the record assembler
//!
//! - [`label_client`]: classification service (tags + lesson clusters)
//! - [`gateway`]: GraphQL persistence backend
//! - [`assembler`]: per-operation pipeline tying both to the pure transforms

pub mod assembler;
pub mod gateway;
pub mod label_client;
pub mod queries;

pub use assembler::RecordAssembler;
pub use gateway::{GraphQlGateway, PersistenceGateway};
pub use label_client::{HttpLabelClient, LabelClassifier};

use debrief_common::config::ServiceConfig;
use debrief_common::{Error, Result};
use std::time::Duration;

const USER_AGENT: &str = concat!("debrief-api/", env!("CARGO_PKG_VERSION"));

/// Build the HTTP transport shared by both outbound clients
///
/// No timeout is applied unless one is configured.
pub fn build_http_client(config: &ServiceConfig) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);

    if let Some(secs) = config.http_timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    builder
        .build()
        .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))
}
