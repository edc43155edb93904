//! Configuration for building a [`Scheme`](crate::Scheme).
//!
//! ```yaml
//! validate: true
//! podDefaults:
//!   dnsPolicy: ClusterFirst
//!   restartPolicy: Always
//!   terminationGracePeriodSeconds: 30
//! ```
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pod::PodDefaults;

/// Failed to read a [`SchemeConfig`]
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The document is not a valid scheme configuration
    #[error("failed to parse scheme config: {0}")]
    Parse(#[source] serde_yaml::Error),
}

/// Options for [`Scheme::from_config`](crate::Scheme::from_config)
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct SchemeConfig {
    /// Pod-level defaults applied to embedded pod templates
    pub pod_defaults: PodDefaults,
    /// Check every kind's conversions while building the scheme
    pub validate: bool,
}

impl Default for SchemeConfig {
    fn default() -> Self {
        Self {
            pod_defaults: PodDefaults::default(),
            validate: true,
        }
    }
}

impl SchemeConfig {
    /// Parse a configuration document; omitted fields keep their defaults
    pub fn from_yaml(document: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(document).map_err(ConfigError::Parse)
    }
}
