use pkg_types::clusterautoscaler::{ClusterAutoscaler, ResourceRange};
use pkg_types::config::OperatorConfig;
use pkg_types::validate::{ValidationError, ValidationResult};
use tracing::debug;

/// Admission checks for ClusterAutoscaler resources.
///
/// Rendering args never fails; this is where a resource the autoscaler
/// would reject at startup gets turned away instead.
pub struct Validator {
    cluster_autoscaler_name: String,
}

impl Validator {
    pub fn new(cluster_autoscaler_name: impl Into<String>) -> Self {
        Self {
            cluster_autoscaler_name: cluster_autoscaler_name.into(),
        }
    }

    pub fn from_config(cfg: &OperatorConfig) -> Self {
        Self::new(cfg.cluster_autoscaler_name.clone())
    }

    /// Check every rule and collect all violations.
    pub fn validate(&self, ca: &ClusterAutoscaler) -> ValidationResult {
        let mut res = ValidationResult::new();

        if ca.metadata.name != self.cluster_autoscaler_name {
            res.push(ValidationError::UnexpectedName {
                expected: self.cluster_autoscaler_name.clone(),
                got: ca.metadata.name.clone(),
            });
        }

        if let Some(rl) = &ca.spec.resource_limits {
            if let Some(r) = rl.cores {
                check_range(&mut res, "spec.resourceLimits.cores", r.min, r.max);
            }
            if let Some(ResourceRange { min, max }) = rl.memory {
                check_range(&mut res, "spec.resourceLimits.memory", min, max);
            }
            for (i, g) in rl.gpus.iter().enumerate() {
                let field = format!("spec.resourceLimits.gpus[{}]", i);
                check_range(&mut res, &field, g.min, g.max);
            }
        }

        if let Some(t) = ca.spec.scale_down.as_ref().and_then(|sd| sd.utilization_threshold)
            && !(0.0..=1.0).contains(&t)
        {
            res.push(ValidationError::UtilizationThresholdOutOfRange(t));
        }

        for err in res.errors() {
            debug!("ClusterAutoscaler {}: {}", ca.metadata.name, err);
        }
        res
    }
}

fn check_range(res: &mut ValidationResult, field: &str, min: i32, max: i32) {
    if min < 0 || max < 0 {
        res.push(ValidationError::RangeNegative {
            field: field.to_string(),
            min,
            max,
        });
    }
    if min > max {
        res.push(ValidationError::RangeInverted {
            field: field.to_string(),
            min,
            max,
        });
    }
}
