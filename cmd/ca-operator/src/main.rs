mod commands;

use clap::{Parser, Subcommand};
use pkg_constants::{env, paths::DEFAULT_OPERATOR_CONFIG};
use pkg_types::config::{OperatorConfig, OperatorConfigFile, load_config_file};
use tracing::info;
use tracing_subscriber::EnvFilter;

use commands::{ArgsOutput, ReportOutput};

#[derive(Parser, Debug)]
#[command(
    name = "ca-operator",
    about = "Render and validate cluster-autoscaler operator resources"
)]
struct Cli {
    /// Path to YAML config file
    #[arg(long, short, global = true, default_value = DEFAULT_OPERATOR_CONFIG)]
    config: String,

    /// Cloud provider passed to the autoscaler
    #[arg(long, global = true, env = env::CLOUD_PROVIDER)]
    cloud_provider: Option<String>,

    /// Namespace the autoscaler runs in
    #[arg(long, global = true, env = env::NAMESPACE)]
    namespace: Option<String>,

    /// Verbosity used when the ClusterAutoscaler sets none
    #[arg(long, global = true, env = env::VERBOSITY)]
    verbosity: Option<i32>,

    /// Name of the singleton ClusterAutoscaler
    #[arg(long, global = true, env = env::CLUSTER_AUTOSCALER_NAME)]
    cluster_autoscaler_name: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the cluster-autoscaler command line for a ClusterAutoscaler
    Args {
        /// ClusterAutoscaler manifest
        #[arg(long, short)]
        file: String,

        #[arg(long, short, value_enum, default_value_t = ArgsOutput::Lines)]
        output: ArgsOutput,

        /// Render even if the resource fails admission checks
        #[arg(long)]
        skip_validation: bool,
    },
    /// Check the replica bounds of a MachineAutoscaler
    Validate {
        /// MachineAutoscaler manifest
        #[arg(long, short)]
        file: String,

        #[arg(long, short, value_enum, default_value_t = ReportOutput::Text)]
        output: ReportOutput,
    },
    /// Print the resolved operator defaults
    Config,
}

/// Merge: CLI args / env > config file > defaults
fn resolve_config(cli: &Cli, file_cfg: OperatorConfigFile) -> OperatorConfig {
    let base = file_cfg.overlay(OperatorConfig::default());
    OperatorConfig {
        cloud_provider: cli.cloud_provider.clone().unwrap_or(base.cloud_provider),
        namespace: cli.namespace.clone().unwrap_or(base.namespace),
        verbosity: cli.verbosity.unwrap_or(base.verbosity),
        cluster_autoscaler_name: cli
            .cluster_autoscaler_name
            .clone()
            .unwrap_or(base.cluster_autoscaler_name),
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    // Load config file (returns defaults if file not found)
    let file_cfg: OperatorConfigFile = load_config_file(&cli.config)?;
    info!("Config file: {}", cli.config);

    let cfg = resolve_config(&cli, file_cfg);
    cfg.validate()?;

    let ok = match &cli.command {
        Commands::Args {
            file,
            output,
            skip_validation,
        } => commands::args(&cfg, file, *output, *skip_validation)?,
        Commands::Validate { file, output } => commands::validate(file, *output)?,
        Commands::Config => commands::config(&cfg)?,
    };

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}
