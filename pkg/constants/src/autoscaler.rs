//! cluster-autoscaler process constants.

// ─── Leader election ───────────────────────────────────────────────────────
//
// Values follow the OpenShift conventions for leader-elected components and
// are the same for every autoscaler the operator deploys.

/// `--leader-elect-lease-duration` passed to every cluster-autoscaler.
pub const LEADER_ELECT_LEASE_DURATION: &str = "137s";

/// `--leader-elect-renew-deadline` passed to every cluster-autoscaler.
pub const LEADER_ELECT_RENEW_DEADLINE: &str = "107s";

/// `--leader-elect-retry-period` passed to every cluster-autoscaler.
pub const LEADER_ELECT_RETRY_PERIOD: &str = "26s";

// ─── Operator defaults ─────────────────────────────────────────────────────

/// Cloud provider handed to the autoscaler when nothing overrides it.
pub const DEFAULT_CLOUD_PROVIDER: &str = "openshift-machine-api";

/// Namespace the autoscaler runs in and watches.
pub const DEFAULT_NAMESPACE: &str = "openshift-machine-api";

/// Log verbosity used when the ClusterAutoscaler does not set one.
pub const DEFAULT_VERBOSITY: i32 = 1;

/// The only ClusterAutoscaler name the operator acts on.
pub const CLUSTER_AUTOSCALER_NAME: &str = "default";
