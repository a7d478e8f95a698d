use std::fmt;

use pkg_constants::autoscaler::{
    LEADER_ELECT_LEASE_DURATION, LEADER_ELECT_RENEW_DEADLINE, LEADER_ELECT_RETRY_PERIOD,
};
use pkg_types::clusterautoscaler::{ClusterAutoscaler, ResourceLimits, ScaleDownConfig};
use pkg_types::config::OperatorConfig;
use tracing::debug;

/// A cluster-autoscaler command line flag.
///
/// Renders as a bare flag, `--flag=value`, `--flag=min:max` or
/// `--flag=type:min:max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AutoscalerArg {
    LogToStderr,
    Namespace,
    CloudProvider,
    MaxGracefulTerminationSec,
    ExpendablePodsPriorityCutoff,
    ScaleDownEnabled,
    ScaleDownDelayAfterAdd,
    ScaleDownDelayAfterDelete,
    ScaleDownDelayAfterFailure,
    ScaleDownUnneededTime,
    ScaleDownUtilizationThreshold,
    MaxNodesTotal,
    MaxNodeProvisionTime,
    CoresTotal,
    MemoryTotal,
    GpuTotal,
    Verbosity,
    BalanceSimilarNodeGroups,
    IgnoreDaemonsetsUtilization,
    SkipNodesWithLocalStorage,
    LeaderElectLeaseDuration,
    LeaderElectRenewDeadline,
    LeaderElectRetryPeriod,
}

impl AutoscalerArg {
    pub const fn as_str(self) -> &'static str {
        match self {
            AutoscalerArg::LogToStderr => "--logtostderr",
            AutoscalerArg::Namespace => "--namespace",
            AutoscalerArg::CloudProvider => "--cloud-provider",
            AutoscalerArg::MaxGracefulTerminationSec => "--max-graceful-termination-sec",
            AutoscalerArg::ExpendablePodsPriorityCutoff => "--expendable-pods-priority-cutoff",
            AutoscalerArg::ScaleDownEnabled => "--scale-down-enabled",
            AutoscalerArg::ScaleDownDelayAfterAdd => "--scale-down-delay-after-add",
            AutoscalerArg::ScaleDownDelayAfterDelete => "--scale-down-delay-after-delete",
            AutoscalerArg::ScaleDownDelayAfterFailure => "--scale-down-delay-after-failure",
            AutoscalerArg::ScaleDownUnneededTime => "--scale-down-unneeded-time",
            AutoscalerArg::ScaleDownUtilizationThreshold => "--scale-down-utilization-threshold",
            AutoscalerArg::MaxNodesTotal => "--max-nodes-total",
            AutoscalerArg::MaxNodeProvisionTime => "--max-node-provision-time",
            AutoscalerArg::CoresTotal => "--cores-total",
            AutoscalerArg::MemoryTotal => "--memory-total",
            AutoscalerArg::GpuTotal => "--gpu-total",
            AutoscalerArg::Verbosity => "--v",
            AutoscalerArg::BalanceSimilarNodeGroups => "--balance-similar-node-groups",
            AutoscalerArg::IgnoreDaemonsetsUtilization => "--ignore-daemonsets-utilization",
            AutoscalerArg::SkipNodesWithLocalStorage => "--skip-nodes-with-local-storage",
            AutoscalerArg::LeaderElectLeaseDuration => "--leader-elect-lease-duration",
            AutoscalerArg::LeaderElectRenewDeadline => "--leader-elect-renew-deadline",
            AutoscalerArg::LeaderElectRetryPeriod => "--leader-elect-retry-period",
        }
    }

    /// `--flag=value`
    pub fn value(self, v: impl fmt::Display) -> String {
        format!("{}={}", self.as_str(), v)
    }

    /// `--flag=min:max`
    pub fn range(self, min: i32, max: i32) -> String {
        format!("{}={}:{}", self.as_str(), min, max)
    }

    /// `--flag=type:min:max`
    pub fn type_range(self, t: &str, min: i32, max: i32) -> String {
        format!("{}={}:{}:{}", self.as_str(), t, min, max)
    }
}

impl fmt::Display for AutoscalerArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Leader-election timings handed to every autoscaler the operator runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaderElection {
    pub lease_duration: &'static str,
    pub renew_deadline: &'static str,
    pub retry_period: &'static str,
}

impl LeaderElection {
    pub const OPENSHIFT: LeaderElection = LeaderElection {
        lease_duration: LEADER_ELECT_LEASE_DURATION,
        renew_deadline: LEADER_ELECT_RENEW_DEADLINE,
        retry_period: LEADER_ELECT_RETRY_PERIOD,
    };
}

impl Default for LeaderElection {
    fn default() -> Self {
        Self::OPENSHIFT
    }
}

/// Command line for the cluster-autoscaler described by `ca`, using the
/// operator-wide leader-election timings.
pub fn autoscaler_args(ca: &ClusterAutoscaler, cfg: &OperatorConfig) -> Vec<String> {
    autoscaler_args_with(ca, cfg, &LeaderElection::default())
}

/// Like [`autoscaler_args`] with explicit leader-election timings.
///
/// The first six entries are always the same flags in the same order; the
/// optional ones follow only for fields that are set, and `--v` is always
/// last.
pub fn autoscaler_args_with(
    ca: &ClusterAutoscaler,
    cfg: &OperatorConfig,
    le: &LeaderElection,
) -> Vec<String> {
    let s = &ca.spec;

    let mut args = vec![
        AutoscalerArg::LogToStderr.to_string(),
        AutoscalerArg::CloudProvider.value(&cfg.cloud_provider),
        AutoscalerArg::Namespace.value(&cfg.namespace),
        AutoscalerArg::LeaderElectLeaseDuration.value(le.lease_duration),
        AutoscalerArg::LeaderElectRenewDeadline.value(le.renew_deadline),
        AutoscalerArg::LeaderElectRetryPeriod.value(le.retry_period),
    ];

    if let Some(v) = s.max_pod_grace_period {
        args.push(AutoscalerArg::MaxGracefulTerminationSec.value(v));
    }

    if let Some(v) = s.max_node_provision_time.as_deref().filter(|v| !v.is_empty()) {
        args.push(AutoscalerArg::MaxNodeProvisionTime.value(v));
    }

    if let Some(v) = s.pod_priority_threshold {
        args.push(AutoscalerArg::ExpendablePodsPriorityCutoff.value(v));
    }

    if let Some(rl) = &s.resource_limits {
        args.extend(resource_args(rl));
    }

    if let Some(sd) = &s.scale_down {
        args.extend(scale_down_args(sd));
    }

    if let Some(v) = s.balance_similar_node_groups {
        args.push(AutoscalerArg::BalanceSimilarNodeGroups.value(v));
    }

    if let Some(v) = s.ignore_daemonsets_utilization {
        args.push(AutoscalerArg::IgnoreDaemonsetsUtilization.value(v));
    }

    if let Some(v) = s.skip_nodes_with_local_storage {
        args.push(AutoscalerArg::SkipNodesWithLocalStorage.value(v));
    }

    // Resource setting wins over the operator default
    let verbosity = s.log_verbosity.unwrap_or(cfg.verbosity);
    args.push(AutoscalerArg::Verbosity.value(verbosity));

    debug!(
        "ClusterAutoscaler {}: rendered {} autoscaler args",
        ca.metadata.name,
        args.len()
    );
    args
}

/// Scale-down flags. A disabled config yields only `--scale-down-enabled=false`
/// and every other field is ignored.
pub fn scale_down_args(sd: &ScaleDownConfig) -> Vec<String> {
    if !sd.enabled {
        return vec![AutoscalerArg::ScaleDownEnabled.value(false)];
    }

    let mut args = vec![AutoscalerArg::ScaleDownEnabled.value(true)];

    let durations = [
        (AutoscalerArg::ScaleDownDelayAfterAdd, &sd.delay_after_add),
        (AutoscalerArg::ScaleDownDelayAfterDelete, &sd.delay_after_delete),
        (AutoscalerArg::ScaleDownDelayAfterFailure, &sd.delay_after_failure),
        (AutoscalerArg::ScaleDownUnneededTime, &sd.unneeded_time),
    ];
    for (arg, v) in durations {
        if let Some(v) = v {
            args.push(arg.value(v));
        }
    }

    if let Some(v) = sd.utilization_threshold {
        args.push(AutoscalerArg::ScaleDownUtilizationThreshold.value(v));
    }

    args
}

/// Resource limit flags. GPU limits are emitted one per entry in the order
/// given, duplicates included.
pub fn resource_args(rl: &ResourceLimits) -> Vec<String> {
    let mut args = Vec::new();

    if let Some(v) = rl.max_nodes_total {
        args.push(AutoscalerArg::MaxNodesTotal.value(v));
    }

    if let Some(r) = rl.cores {
        args.push(AutoscalerArg::CoresTotal.range(r.min, r.max));
    }

    if let Some(r) = rl.memory {
        args.push(AutoscalerArg::MemoryTotal.range(r.min, r.max));
    }

    for g in &rl.gpus {
        args.push(AutoscalerArg::GpuTotal.type_range(&g.gpu_type, g.min, g.max));
    }

    args
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkg_types::clusterautoscaler::{ClusterAutoscalerSpec, GpuLimit, ResourceRange};
    use pkg_types::meta::ObjectMeta;

    fn test_config() -> OperatorConfig {
        OperatorConfig {
            cloud_provider: "testProvider".to_string(),
            namespace: "test-namespace".to_string(),
            verbosity: 2,
            cluster_autoscaler_name: "default".to_string(),
        }
    }

    fn test_ca(spec: ClusterAutoscalerSpec) -> ClusterAutoscaler {
        ClusterAutoscaler {
            api_version: "autoscaling.openshift.io/v1".to_string(),
            kind: "ClusterAutoscaler".to_string(),
            metadata: ObjectMeta {
                name: "default".to_string(),
                namespace: None,
            },
            spec,
        }
    }

    fn full_spec() -> ClusterAutoscalerSpec {
        ClusterAutoscalerSpec {
            max_pod_grace_period: Some(60),
            max_node_provision_time: Some("30m".to_string()),
            pod_priority_threshold: Some(-10),
            resource_limits: Some(ResourceLimits {
                max_nodes_total: Some(24),
                cores: Some(ResourceRange { min: 2, max: 16 }),
                memory: Some(ResourceRange { min: 4, max: 64 }),
                gpus: vec![GpuLimit {
                    gpu_type: "nvidia.com/gpu".to_string(),
                    min: 0,
                    max: 8,
                }],
            }),
            scale_down: Some(ScaleDownConfig {
                enabled: true,
                delay_after_add: Some("10s".to_string()),
                delay_after_delete: Some("20s".to_string()),
                delay_after_failure: Some("30s".to_string()),
                unneeded_time: Some("5m".to_string()),
                utilization_threshold: Some(0.4),
            }),
            balance_similar_node_groups: Some(true),
            ignore_daemonsets_utilization: Some(false),
            skip_nodes_with_local_storage: Some(true),
            log_verbosity: None,
        }
    }

    const FIXED_PREFIX: [&str; 6] = [
        "--logtostderr",
        "--cloud-provider=testProvider",
        "--namespace=test-namespace",
        "--leader-elect-lease-duration=137s",
        "--leader-elect-renew-deadline=107s",
        "--leader-elect-retry-period=26s",
    ];

    #[test]
    fn arg_formatting() {
        assert_eq!(AutoscalerArg::LogToStderr.to_string(), "--logtostderr");
        assert_eq!(AutoscalerArg::MaxNodesTotal.value(24), "--max-nodes-total=24");
        assert_eq!(AutoscalerArg::CoresTotal.range(2, 16), "--cores-total=2:16");
        assert_eq!(
            AutoscalerArg::GpuTotal.type_range("nvidia.com/gpu", 0, 8),
            "--gpu-total=nvidia.com/gpu:0:8"
        );
        assert_eq!(
            AutoscalerArg::ScaleDownUtilizationThreshold.value(0.5),
            "--scale-down-utilization-threshold=0.5"
        );
    }

    #[test]
    fn empty_spec_has_fixed_prefix_and_default_verbosity() {
        let args = autoscaler_args(&test_ca(ClusterAutoscalerSpec::default()), &test_config());
        let mut expected: Vec<&str> = FIXED_PREFIX.to_vec();
        expected.push("--v=2");
        assert_eq!(args, expected);
    }

    #[test]
    fn full_spec_in_order() {
        let args = autoscaler_args(&test_ca(full_spec()), &test_config());
        let mut expected: Vec<&str> = FIXED_PREFIX.to_vec();
        expected.extend([
            "--max-graceful-termination-sec=60",
            "--max-node-provision-time=30m",
            "--expendable-pods-priority-cutoff=-10",
            "--max-nodes-total=24",
            "--cores-total=2:16",
            "--memory-total=4:64",
            "--gpu-total=nvidia.com/gpu:0:8",
            "--scale-down-enabled=true",
            "--scale-down-delay-after-add=10s",
            "--scale-down-delay-after-delete=20s",
            "--scale-down-delay-after-failure=30s",
            "--scale-down-unneeded-time=5m",
            "--scale-down-utilization-threshold=0.4",
            "--balance-similar-node-groups=true",
            "--ignore-daemonsets-utilization=false",
            "--skip-nodes-with-local-storage=true",
            "--v=2",
        ]);
        assert_eq!(args, expected);
    }

    #[test]
    fn prefix_is_fixed_regardless_of_spec() {
        for spec in [ClusterAutoscalerSpec::default(), full_spec()] {
            let args = autoscaler_args(&test_ca(spec), &test_config());
            assert_eq!(&args[..6], &FIXED_PREFIX[..]);
        }
    }

    #[test]
    fn args_are_deterministic() {
        let ca = test_ca(full_spec());
        let cfg = test_config();
        assert_eq!(autoscaler_args(&ca, &cfg), autoscaler_args(&ca, &cfg));
    }

    #[test]
    fn verbosity_prefers_resource_over_default() {
        let spec = ClusterAutoscalerSpec {
            log_verbosity: Some(3),
            ..Default::default()
        };
        let args = autoscaler_args(&test_ca(spec), &test_config());
        let verbosity: Vec<&String> = args.iter().filter(|a| a.starts_with("--v=")).collect();
        assert_eq!(verbosity, vec!["--v=3"]);
        assert_eq!(args.last().map(String::as_str), Some("--v=3"));
    }

    #[test]
    fn explicit_false_booleans_are_emitted() {
        let spec = ClusterAutoscalerSpec {
            balance_similar_node_groups: Some(false),
            skip_nodes_with_local_storage: Some(false),
            ..Default::default()
        };
        let args = autoscaler_args(&test_ca(spec), &test_config());
        assert!(args.contains(&"--balance-similar-node-groups=false".to_string()));
        assert!(args.contains(&"--skip-nodes-with-local-storage=false".to_string()));
        assert!(!args.iter().any(|a| a.starts_with("--ignore-daemonsets-utilization")));
    }

    #[test]
    fn empty_provision_time_is_omitted() {
        let spec = ClusterAutoscalerSpec {
            max_node_provision_time: Some(String::new()),
            ..Default::default()
        };
        let args = autoscaler_args(&test_ca(spec), &test_config());
        assert!(!args.iter().any(|a| a.starts_with("--max-node-provision-time")));
    }

    #[test]
    fn injected_leader_election_timings() {
        let le = LeaderElection {
            lease_duration: "60s",
            renew_deadline: "40s",
            retry_period: "10s",
        };
        let args = autoscaler_args_with(
            &test_ca(ClusterAutoscalerSpec::default()),
            &test_config(),
            &le,
        );
        assert_eq!(args[3], "--leader-elect-lease-duration=60s");
        assert_eq!(args[4], "--leader-elect-renew-deadline=40s");
        assert_eq!(args[5], "--leader-elect-retry-period=10s");
    }

    #[test]
    fn scale_down_disabled_ignores_other_fields() {
        let sd = ScaleDownConfig {
            enabled: false,
            delay_after_add: Some("10s".to_string()),
            utilization_threshold: Some(0.5),
            ..Default::default()
        };
        assert_eq!(scale_down_args(&sd), vec!["--scale-down-enabled=false"]);
    }

    #[test]
    fn scale_down_enabled_only_present_fields() {
        let sd = ScaleDownConfig {
            enabled: true,
            delay_after_failure: Some("3m".to_string()),
            utilization_threshold: Some(1.0),
            ..Default::default()
        };
        assert_eq!(
            scale_down_args(&sd),
            vec![
                "--scale-down-enabled=true",
                "--scale-down-delay-after-failure=3m",
                "--scale-down-utilization-threshold=1",
            ]
        );
    }

    #[test]
    fn resource_args_empty() {
        assert!(resource_args(&ResourceLimits::default()).is_empty());
    }

    #[test]
    fn gpu_order_and_duplicates_preserved() {
        let gpu = |t: &str, min, max| GpuLimit {
            gpu_type: t.to_string(),
            min,
            max,
        };
        let rl = ResourceLimits {
            gpus: vec![gpu("nvidia", 1, 4), gpu("amd", 0, 2), gpu("nvidia", 1, 4)],
            ..Default::default()
        };
        assert_eq!(
            resource_args(&rl),
            vec![
                "--gpu-total=nvidia:1:4",
                "--gpu-total=amd:0:2",
                "--gpu-total=nvidia:1:4",
            ]
        );
    }

    #[test]
    fn args_from_manifest() {
        let yaml = r#"
metadata:
  name: default
spec:
  podPriorityThreshold: -10
  scaleDown:
    enabled: false
    delayAfterAdd: 10s
  logVerbosity: 5
"#;
        let ca: ClusterAutoscaler = serde_yaml::from_str(yaml).unwrap();
        let args = autoscaler_args(&ca, &test_config());
        assert_eq!(
            &args[6..],
            &[
                "--expendable-pods-priority-cutoff=-10",
                "--scale-down-enabled=false",
                "--v=5",
            ]
        );
    }
}
