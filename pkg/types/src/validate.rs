use anyhow::{Result, bail};
use thiserror::Error;

/// Validate a value that must be a DNS-1123 label (resource names, namespaces).
/// Rules: lowercase `[a-z0-9-]`, max 63 chars, no leading/trailing hyphens.
pub fn validate_dns_label(what: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        bail!("{} must not be empty", what);
    }
    if value.len() > 63 {
        bail!("{} '{}' exceeds 63 characters (got {})", what, value, value.len());
    }
    if value.starts_with('-') || value.ends_with('-') {
        bail!("{} '{}' must not start or end with a hyphen", what, value);
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        bail!(
            "{} '{}' must contain only lowercase letters, digits, and hyphens [a-z0-9-]",
            what,
            value
        );
    }
    Ok(())
}

/// One failed invariant on an autoscaling resource.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("spec.minReplicas must be non-negative, got {0}")]
    MinReplicasNegative(i32),

    #[error("spec.maxReplicas must be non-negative, got {0}")]
    MaxReplicasNegative(i32),

    #[error("spec.maxReplicas ({max}) must be greater than or equal to spec.minReplicas ({min})")]
    MaxLessThanMin { min: i32, max: i32 },

    #[error("metadata.name must be '{expected}', got '{got}'")]
    UnexpectedName { expected: String, got: String },

    #[error("{field} must not be negative, got {min}:{max}")]
    RangeNegative { field: String, min: i32, max: i32 },

    #[error("{field} min ({min}) must not exceed max ({max})")]
    RangeInverted { field: String, min: i32, max: i32 },

    #[error("spec.scaleDown.utilizationThreshold must be within [0, 1], got {0}")]
    UtilizationThresholdOutOfRange(f64),
}

impl ValidationError {
    /// Stable, machine-checkable identifier of the violated rule.
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::MinReplicasNegative(_) => "min-replicas-negative",
            ValidationError::MaxReplicasNegative(_) => "max-replicas-negative",
            ValidationError::MaxLessThanMin { .. } => "max-less-than-min",
            ValidationError::UnexpectedName { .. } => "unexpected-name",
            ValidationError::RangeNegative { .. } => "range-negative",
            ValidationError::RangeInverted { .. } => "range-min-exceeds-max",
            ValidationError::UtilizationThresholdOutOfRange(_) => {
                "utilization-threshold-out-of-range"
            }
        }
    }

    /// Path of the offending field within the resource.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::MinReplicasNegative(_) => "spec.minReplicas",
            ValidationError::MaxReplicasNegative(_) | ValidationError::MaxLessThanMin { .. } => {
                "spec.maxReplicas"
            }
            ValidationError::UnexpectedName { .. } => "metadata.name",
            ValidationError::RangeNegative { field, .. }
            | ValidationError::RangeInverted { field, .. } => field.as_str(),
            ValidationError::UtilizationThresholdOutOfRange(_) => {
                "spec.scaleDown.utilizationThreshold"
            }
        }
    }
}

/// Aggregate outcome of validating one resource. Every violated rule is
/// recorded; nothing short-circuits.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, err: ValidationError) {
        self.errors.push(err);
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Violations in the order the rules were evaluated.
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn kinds(&self) -> Vec<&'static str> {
        self.errors.iter().map(ValidationError::kind).collect()
    }

    /// Collapse into a single error carrying every message, for callers
    /// that only need accept/reject.
    pub fn into_result(self) -> Result<()> {
        if self.errors.is_empty() {
            return Ok(());
        }
        let msgs: Vec<String> = self.errors.iter().map(|e| e.to_string()).collect();
        bail!("{}", msgs.join("; "))
    }
}
