//! Command-line arguments
//!
//! Every flag can also be supplied through a `DEBRIEF_*` environment
//! variable; flags win over the environment, both win over the TOML file.

use clap::Parser;
use debrief_common::config::{
    load_toml_config, ConfigOverrides, ServiceConfig, UpdateIdPolicy,
};
use std::path::PathBuf;

/// Command-line arguments for debrief-api
#[derive(Parser, Debug)]
#[command(name = "debrief-api")]
#[command(about = "Debrief normalization and enrichment service")]
#[command(version)]
pub struct Args {
    /// TOML config file (default: <config dir>/debrief/config.toml)
    #[arg(short, long, env = "DEBRIEF_CONFIG")]
    pub config: Option<PathBuf>,

    /// Listen address
    #[arg(long, env = "DEBRIEF_BIND_ADDR")]
    pub bind_addr: Option<String>,

    /// Base URL of the classification service
    #[arg(long, env = "DEBRIEF_CLASSIFIER_URL")]
    pub classifier_url: Option<String>,

    /// GraphQL endpoint of the persistence backend
    #[arg(long, env = "DEBRIEF_GATEWAY_URL")]
    pub gateway_url: Option<String>,

    /// Comma-separated paragraph names fed to tag prediction
    #[arg(long, env = "DEBRIEF_SECTION_NAMES", value_delimiter = ',')]
    pub section_names: Option<Vec<String>>,

    /// Child identifier policy on update: preserve or clear
    #[arg(long, env = "DEBRIEF_UPDATE_DESCENDANT_IDS")]
    pub update_descendant_ids: Option<UpdateIdPolicy>,

    /// Browser origin allowed by CORS
    #[arg(long, env = "DEBRIEF_ALLOWED_ORIGIN")]
    pub allowed_origin: Option<String>,

    /// Timeout in seconds for outbound HTTP calls
    #[arg(long, env = "DEBRIEF_HTTP_TIMEOUT_SECS")]
    pub http_timeout_secs: Option<u64>,
}

impl Args {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            bind_addr: self.bind_addr.clone(),
            classifier_url: self.classifier_url.clone(),
            gateway_url: self.gateway_url.clone(),
            section_names: self.section_names.clone(),
            update_descendant_ids: self.update_descendant_ids,
            allowed_origin: self.allowed_origin.clone(),
            http_timeout_secs: self.http_timeout_secs,
        }
    }

    /// Resolve the final configuration from flags, environment and TOML
    pub fn resolve_config(&self) -> debrief_common::Result<ServiceConfig> {
        let toml = load_toml_config(self.config.as_deref())?;
        ServiceConfig::resolve(self.overrides(), toml)
    }
}
