use serde::{Deserialize, Serialize};

use crate::meta::ObjectMeta;

// --- Resource limits ---

/// Inclusive `min:max` bound on a cluster-wide resource total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRange {
    pub min: i32,
    pub max: i32,
}

/// Bound on the number of GPUs of one type across the cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GpuLimit {
    /// GPU type as the cloud provider labels it (e.g. `nvidia.com/gpu`)
    #[serde(rename = "type")]
    pub gpu_type: String,
    pub min: i32,
    pub max: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceLimits {
    #[serde(default)]
    pub max_nodes_total: Option<i32>,
    /// Cores in the cluster, `min:max`
    #[serde(default)]
    pub cores: Option<ResourceRange>,
    /// Memory in the cluster in GiB, `min:max`
    #[serde(default)]
    pub memory: Option<ResourceRange>,
    /// Kept in declaration order; duplicates are passed through as-is.
    #[serde(default)]
    pub gpus: Vec<GpuLimit>,
}

// --- Scale down ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleDownConfig {
    pub enabled: bool,
    #[serde(default)]
    pub delay_after_add: Option<String>,
    #[serde(default)]
    pub delay_after_delete: Option<String>,
    #[serde(default)]
    pub delay_after_failure: Option<String>,
    /// How long a node should be unneeded before it is eligible for scale down
    #[serde(default)]
    pub unneeded_time: Option<String>,
    /// Node utilization level, below which a node can be considered for
    /// scale down
    #[serde(default)]
    pub utilization_threshold: Option<f64>,
}

// --- ClusterAutoscaler spec ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterAutoscalerSpec {
    /// Gives pods graceful termination time before scaling down, in seconds
    #[serde(default)]
    pub max_pod_grace_period: Option<i32>,
    /// Maximum time to wait for a node to be provisioned (e.g. `15m`)
    #[serde(default)]
    pub max_node_provision_time: Option<String>,
    /// Pods with priority below this cutoff are expendable
    #[serde(default)]
    pub pod_priority_threshold: Option<i32>,
    #[serde(default)]
    pub resource_limits: Option<ResourceLimits>,
    #[serde(default)]
    pub scale_down: Option<ScaleDownConfig>,
    #[serde(default)]
    pub balance_similar_node_groups: Option<bool>,
    #[serde(default)]
    pub ignore_daemonsets_utilization: Option<bool>,
    #[serde(default)]
    pub skip_nodes_with_local_storage: Option<bool>,
    #[serde(default)]
    pub log_verbosity: Option<i32>,
}

// --- ClusterAutoscaler ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterAutoscaler {
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub kind: String,
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: ClusterAutoscalerSpec,
}
