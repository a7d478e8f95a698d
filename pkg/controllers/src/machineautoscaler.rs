use pkg_types::machineautoscaler::{MachineAutoscaler, MachineAutoscalerSpec};
use pkg_types::validate::{ValidationError, ValidationResult};
use tracing::debug;

/// Replica-bound checks for MachineAutoscaler resources.
///
/// All three rules are evaluated on every call, so a resource breaking
/// several of them gets one violation per rule.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator;

impl Validator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, ma: &MachineAutoscaler) -> ValidationResult {
        let res = self.validate_spec(&ma.spec);
        for err in res.errors() {
            debug!("MachineAutoscaler {}: {}", ma.metadata.name, err);
        }
        res
    }

    pub fn validate_spec(&self, spec: &MachineAutoscalerSpec) -> ValidationResult {
        let mut res = ValidationResult::new();

        if spec.min_replicas < 0 {
            res.push(ValidationError::MinReplicasNegative(spec.min_replicas));
        }

        if spec.max_replicas < 0 {
            res.push(ValidationError::MaxReplicasNegative(spec.max_replicas));
        }

        if spec.max_replicas < spec.min_replicas {
            res.push(ValidationError::MaxLessThanMin {
                min: spec.min_replicas,
                max: spec.max_replicas,
            });
        }

        res
    }
}
