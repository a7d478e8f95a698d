use anyhow::Context;
use clap::ValueEnum;
use pkg_controllers::{clusterautoscaler, machineautoscaler};
use pkg_types::clusterautoscaler::ClusterAutoscaler;
use pkg_types::config::OperatorConfig;
use pkg_types::machineautoscaler::MachineAutoscaler;
use pkg_types::manifest::load_manifest;
use pkg_types::validate::ValidationResult;
use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ArgsOutput {
    /// One argument per line
    Lines,
    /// JSON array, ready for a container `args` field
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportOutput {
    Text,
    Json,
}

#[derive(Debug, Serialize)]
struct Violation<'a> {
    kind: &'static str,
    field: &'a str,
    message: String,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    valid: bool,
    violations: Vec<Violation<'a>>,
}

/// Render the autoscaler command line. Returns whether a valid
/// resource was rendered.
pub fn args(
    cfg: &OperatorConfig,
    path: &str,
    output: ArgsOutput,
    skip_validation: bool,
) -> anyhow::Result<bool> {
    let ca: ClusterAutoscaler = load_manifest(path)?;

    let res = clusterautoscaler::Validator::from_config(cfg).validate(&ca);
    if !res.is_valid() {
        if !skip_validation {
            res.clone()
                .into_result()
                .with_context(|| format!("ClusterAutoscaler {} rejected", ca.metadata.name))?;
        }
        warn!(
            "ClusterAutoscaler {}: rendering despite {} violation(s)",
            ca.metadata.name,
            res.errors().len()
        );
    }

    let args = clusterautoscaler::autoscaler_args(&ca, cfg);
    info!(
        "ClusterAutoscaler {}: {} autoscaler args",
        ca.metadata.name,
        args.len()
    );
    println!("{}", render_args(&args, output)?);
    Ok(true)
}

/// Validate a MachineAutoscaler manifest. Returns `false` if it is invalid.
pub fn validate(path: &str, output: ReportOutput) -> anyhow::Result<bool> {
    let ma: MachineAutoscaler = load_manifest(path)?;
    let res = machineautoscaler::Validator::new().validate(&ma);
    info!(
        "MachineAutoscaler {}: valid={} violations={}",
        ma.metadata.name,
        res.is_valid(),
        res.errors().len()
    );
    println!("{}", render_report(&res, output)?);
    Ok(res.is_valid())
}

pub fn config(cfg: &OperatorConfig) -> anyhow::Result<bool> {
    print!("{}", serde_yaml::to_string(cfg)?);
    Ok(true)
}

fn render_args(args: &[String], output: ArgsOutput) -> anyhow::Result<String> {
    match output {
        ArgsOutput::Lines => Ok(args.join("\n")),
        ArgsOutput::Json => Ok(serde_json::to_string_pretty(args)?),
    }
}

fn render_report(res: &ValidationResult, output: ReportOutput) -> anyhow::Result<String> {
    match output {
        ReportOutput::Text => {
            if res.is_valid() {
                return Ok("valid".to_string());
            }
            let lines: Vec<String> = res
                .errors()
                .iter()
                .map(|e| format!("{}: {}", e.kind(), e))
                .collect();
            Ok(lines.join("\n"))
        }
        ReportOutput::Json => {
            let report = Report {
                valid: res.is_valid(),
                violations: res
                    .errors()
                    .iter()
                    .map(|e| Violation {
                        kind: e.kind(),
                        field: e.field(),
                        message: e.to_string(),
                    })
                    .collect(),
            };
            Ok(serde_json::to_string_pretty(&report)?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkg_types::validate::ValidationError;

    #[test]
    fn args_as_lines_and_json() {
        let args = vec!["--logtostderr".to_string(), "--v=2".to_string()];
        assert_eq!(
            render_args(&args, ArgsOutput::Lines).unwrap(),
            "--logtostderr\n--v=2"
        );
        let json: Vec<String> =
            serde_json::from_str(&render_args(&args, ArgsOutput::Json).unwrap()).unwrap();
        assert_eq!(json, args);
    }

    #[test]
    fn text_report() {
        assert_eq!(
            render_report(&ValidationResult::new(), ReportOutput::Text).unwrap(),
            "valid"
        );

        let mut res = ValidationResult::new();
        res.push(ValidationError::MaxLessThanMin { min: 8, max: 2 });
        assert_eq!(
            render_report(&res, ReportOutput::Text).unwrap(),
            "max-less-than-min: spec.maxReplicas (2) must be greater than or equal to spec.minReplicas (8)"
        );
    }

    #[test]
    fn json_report() {
        let mut res = ValidationResult::new();
        res.push(ValidationError::MinReplicasNegative(-1));
        res.push(ValidationError::MaxReplicasNegative(-5));

        let out = render_report(&res, ReportOutput::Json).unwrap();
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["valid"], false);
        assert_eq!(v["violations"][0]["kind"], "min-replicas-negative");
        assert_eq!(v["violations"][0]["field"], "spec.minReplicas");
        assert_eq!(v["violations"][1]["kind"], "max-replicas-negative");
        assert_eq!(v["violations"].as_array().map(Vec::len), Some(2));
    }
}
