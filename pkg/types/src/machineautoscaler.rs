use serde::{Deserialize, Serialize};

use crate::meta::{CrossVersionObjectReference, ObjectMeta};

// --- MachineAutoscaler spec ---

/// Replica bounds for one scalable machine group.
///
/// Bounds are signed so that out-of-range input survives deserialization
/// and can be reported by the validator instead of failing to parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineAutoscalerSpec {
    pub min_replicas: i32,
    pub max_replicas: i32,
    pub scale_target_ref: CrossVersionObjectReference,
}

// --- MachineAutoscaler ---

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineAutoscaler {
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub kind: String,
    pub metadata: ObjectMeta,
    pub spec: MachineAutoscalerSpec,
}
