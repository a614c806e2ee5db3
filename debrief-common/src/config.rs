//! Configuration loading and resolution
//!
//! Priority order, highest first:
//! 1. Command-line argument
//! 2. Environment variable (`DEBRIEF_*`)
//! 3. TOML config file
//! 4. Compiled default
//!
//! Levels 1 and 2 are collapsed by the binary's argument parser into a
//! [`ConfigOverrides`]; this module merges them with the TOML layer and the
//! defaults into one immutable [`ServiceConfig`].

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{info, warn};

use crate::{Error, Result};

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:4003";
pub const DEFAULT_CLASSIFIER_URL: &str = "http://localhost:4005";
pub const DEFAULT_GATEWAY_URL: &str = "http://localhost:8080/graphql";
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:4000";
pub const DEFAULT_SECTION_NAMES: &[&str] = &["background", "summary"];

/// What an update does with identifiers below the record itself
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateIdPolicy {
    /// Child ids are forwarded so the backend updates rows in place
    #[default]
    Preserve,
    /// Child ids are cleared so the backend recreates every child row
    Clear,
}

impl FromStr for UpdateIdPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "preserve" => Ok(UpdateIdPolicy::Preserve),
            "clear" => Ok(UpdateIdPolicy::Clear),
            other => Err(Error::Config(format!(
                "Unknown update id policy '{}' (expected 'preserve' or 'clear')",
                other
            ))),
        }
    }
}

/// Contents of the TOML config file; every key is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    pub bind_addr: Option<String>,
    pub classifier_url: Option<String>,
    pub gateway_url: Option<String>,
    pub section_names: Option<Vec<String>>,
    pub update_descendant_ids: Option<UpdateIdPolicy>,
    pub allowed_origin: Option<String>,
    pub http_timeout_secs: Option<u64>,
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub bind_addr: Option<String>,
    pub classifier_url: Option<String>,
    pub gateway_url: Option<String>,
    pub section_names: Option<Vec<String>>,
    pub update_descendant_ids: Option<UpdateIdPolicy>,
    pub allowed_origin: Option<String>,
    pub http_timeout_secs: Option<u64>,
}

/// Fully resolved service configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    /// Listen address for the HTTP server
    pub bind_addr: String,
    /// Base URL of the classification service (`/predict` is appended)
    pub classifier_url: String,
    /// GraphQL endpoint of the persistence backend
    pub gateway_url: String,
    /// Paragraph names whose bullets feed tag prediction
    pub section_names: Vec<String>,
    /// Identity-reset policy for update operations
    pub update_descendant_ids: UpdateIdPolicy,
    /// Browser origin allowed by CORS
    pub allowed_origin: String,
    /// Transport timeout for outbound calls; none when absent
    pub http_timeout_secs: Option<u64>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            classifier_url: DEFAULT_CLASSIFIER_URL.to_string(),
            gateway_url: DEFAULT_GATEWAY_URL.to_string(),
            section_names: DEFAULT_SECTION_NAMES.iter().map(|s| s.to_string()).collect(),
            update_descendant_ids: UpdateIdPolicy::default(),
            allowed_origin: DEFAULT_ALLOWED_ORIGIN.to_string(),
            http_timeout_secs: None,
        }
    }
}

impl ServiceConfig {
    /// Merge overrides, TOML and defaults, then validate
    pub fn resolve(overrides: ConfigOverrides, toml: TomlConfig) -> Result<Self> {
        let defaults = ServiceConfig::default();

        let config = ServiceConfig {
            bind_addr: overrides
                .bind_addr
                .or(toml.bind_addr)
                .unwrap_or(defaults.bind_addr),
            classifier_url: trim_base_url(
                overrides
                    .classifier_url
                    .or(toml.classifier_url)
                    .unwrap_or(defaults.classifier_url),
            ),
            gateway_url: trim_base_url(
                overrides
                    .gateway_url
                    .or(toml.gateway_url)
                    .unwrap_or(defaults.gateway_url),
            ),
            section_names: overrides
                .section_names
                .or(toml.section_names)
                .unwrap_or(defaults.section_names),
            update_descendant_ids: overrides
                .update_descendant_ids
                .or(toml.update_descendant_ids)
                .unwrap_or(defaults.update_descendant_ids),
            allowed_origin: overrides
                .allowed_origin
                .or(toml.allowed_origin)
                .unwrap_or(defaults.allowed_origin),
            http_timeout_secs: overrides.http_timeout_secs.or(toml.http_timeout_secs),
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.classifier_url.trim().is_empty() {
            return Err(Error::Config("classifier_url must not be empty".to_string()));
        }
        if self.gateway_url.trim().is_empty() {
            return Err(Error::Config("gateway_url must not be empty".to_string()));
        }
        if self.section_names.is_empty() {
            warn!("No section names configured; tag prediction will receive empty documents");
        }
        Ok(())
    }
}

fn trim_base_url(url: String) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// Default TOML location: `<config_dir>/debrief/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("debrief").join("config.toml"))
}

/// Load the TOML layer
///
/// A missing file is not an error: a warning is logged and an empty layer
/// returned. An unreadable or unparsable file is [`Error::Config`].
pub fn load_toml_config(path: Option<&Path>) -> Result<TomlConfig> {
    let path = match path.map(Path::to_path_buf).or_else(default_config_path) {
        Some(path) => path,
        None => {
            warn!("Could not determine config directory; using defaults");
            return Ok(TomlConfig::default());
        }
    };

    if !path.exists() {
        warn!("Config file not found at {}; using defaults", path.display());
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .map_err(|e| Error::Config(format!("Read TOML failed ({}): {}", path.display(), e)))?;
    let config = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse TOML failed ({}): {}", path.display(), e)))?;

    info!("Loaded config file {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_nothing_supplied() {
        let config = ServiceConfig::resolve(ConfigOverrides::default(), TomlConfig::default()).unwrap();
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.update_descendant_ids, UpdateIdPolicy::Preserve);
        assert!(config.http_timeout_secs.is_none());
    }

    #[test]
    fn test_override_beats_toml() {
        let toml = TomlConfig {
            classifier_url: Some("http://toml:1".into()),
            gateway_url: Some("http://toml:2/graphql".into()),
            ..Default::default()
        };
        let overrides = ConfigOverrides {
            classifier_url: Some("http://cli:1/".into()),
            ..Default::default()
        };

        let config = ServiceConfig::resolve(overrides, toml).unwrap();
        assert_eq!(config.classifier_url, "http://cli:1");
        assert_eq!(config.gateway_url, "http://toml:2/graphql");
    }

    #[test]
    fn test_empty_url_rejected() {
        let overrides = ConfigOverrides {
            gateway_url: Some("  ".into()),
            ..Default::default()
        };
        assert!(matches!(
            ServiceConfig::resolve(overrides, TomlConfig::default()),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("Clear".parse::<UpdateIdPolicy>().unwrap(), UpdateIdPolicy::Clear);
        assert_eq!(" preserve ".parse::<UpdateIdPolicy>().unwrap(), UpdateIdPolicy::Preserve);
        assert!("sometimes".parse::<UpdateIdPolicy>().is_err());
    }
}
