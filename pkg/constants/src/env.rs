//! Environment variables read by the operator.

pub const NAMESPACE: &str = "CLUSTER_AUTOSCALER_NAMESPACE";
pub const CLOUD_PROVIDER: &str = "CLUSTER_AUTOSCALER_CLOUD_PROVIDER";
pub const VERBOSITY: &str = "CLUSTER_AUTOSCALER_VERBOSITY";
pub const CLUSTER_AUTOSCALER_NAME: &str = "CLUSTER_AUTOSCALER_NAME";
