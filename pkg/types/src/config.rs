use anyhow::{Context, bail};
use pkg_constants::autoscaler::{
    CLUSTER_AUTOSCALER_NAME, DEFAULT_CLOUD_PROVIDER, DEFAULT_NAMESPACE, DEFAULT_VERBOSITY,
};
use serde::{Deserialize, Serialize};

use crate::validate::validate_dns_label;

/// Operator-level defaults merged into every rendered autoscaler invocation.
///
/// These come from the environment the operator runs in, never from the
/// ClusterAutoscaler resource itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OperatorConfig {
    pub cloud_provider: String,
    pub namespace: String,
    /// Fallback for `--v` when the resource has no `logVerbosity`
    pub verbosity: i32,
    /// Name of the singleton ClusterAutoscaler the operator accepts
    pub cluster_autoscaler_name: String,
}

impl Default for OperatorConfig {
    fn default() -> Self {
        Self {
            cloud_provider: DEFAULT_CLOUD_PROVIDER.to_string(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            verbosity: DEFAULT_VERBOSITY,
            cluster_autoscaler_name: CLUSTER_AUTOSCALER_NAME.to_string(),
        }
    }
}

impl OperatorConfig {
    /// Reject defaults that could never produce a working autoscaler.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.cloud_provider.is_empty() {
            bail!("cloud provider must not be empty");
        }
        validate_dns_label("namespace", &self.namespace)?;
        validate_dns_label("cluster autoscaler name", &self.cluster_autoscaler_name)?;
        Ok(())
    }
}

/// Operator configuration file (YAML).
///
/// Example `config.yaml`:
/// ```yaml
/// cloud-provider: aws
/// namespace: kube-system
/// verbosity: 2
/// cluster-autoscaler-name: default
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OperatorConfigFile {
    #[serde(default, alias = "cloud-provider")]
    pub cloud_provider: Option<String>,
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub verbosity: Option<i32>,
    #[serde(default, alias = "cluster-autoscaler-name")]
    pub cluster_autoscaler_name: Option<String>,
}

impl OperatorConfigFile {
    /// Apply the values set in the file on top of `base`.
    pub fn overlay(self, base: OperatorConfig) -> OperatorConfig {
        OperatorConfig {
            cloud_provider: self.cloud_provider.unwrap_or(base.cloud_provider),
            namespace: self.namespace.unwrap_or(base.namespace),
            verbosity: self.verbosity.unwrap_or(base.verbosity),
            cluster_autoscaler_name: self
                .cluster_autoscaler_name
                .unwrap_or(base.cluster_autoscaler_name),
        }
    }
}

/// Load a YAML config file, returning the default if the file doesn't exist.
pub fn load_config_file<T: serde::de::DeserializeOwned + Default>(path: &str) -> anyhow::Result<T> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(T::default());
        }
        Err(e) => return Err(e).with_context(|| format!("reading config file {}", path)),
    };
    let config: T =
        serde_yaml::from_str(&content).with_context(|| format!("parsing config file {}", path))?;
    Ok(config)
}
