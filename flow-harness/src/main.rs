//! flow-harness CLI
//!
//! Launch campaigns and run workflow scenarios against the supervisor.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use flow_harness::commands;

#[derive(Parser)]
#[command(name = "flow-harness")]
#[command(about = "Launch campaigns and run workflow scenarios")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one campaign from a JSON input file
    Launch {
        /// Campaign input (title, brand, budget, targetCriteria, ...)
        #[arg(long)]
        input: PathBuf,

        /// Path to config file (default: ~/.config/influencer-flow/config.toml)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Seed for simulated outcomes
        #[arg(long)]
        seed: Option<u64>,

        /// Skip simulated delays
        #[arg(long)]
        instant: bool,
    },
    /// Run a workflow scenario
    Run {
        /// Scenario name (directory in scenarios/)
        scenario: String,

        /// Path to scenarios directory (default: ./scenarios)
        #[arg(long)]
        scenarios_dir: Option<PathBuf>,
    },
    /// Generate a scenario for a reference outcome
    GenerateScenario {
        /// completed, no-responses or missing-discovery
        #[arg(long, default_value = "completed")]
        outcome: commands::generate::ScenarioOutcome,

        /// Campaign budget
        #[arg(long, default_value = "1000")]
        budget: f64,

        /// Output directory for the scenario
        #[arg(long)]
        output: PathBuf,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Launch {
            input,
            config,
            seed,
            instant,
        } => {
            let launch_config = commands::launch::LaunchConfig {
                input,
                config_path: config,
                seed,
                instant,
            };
            let result = commands::launch::launch(&launch_config).await?;

            if let Some(ref receipt) = result.receipt {
                println!("{}", serde_json::to_string_pretty(receipt)?);
            }
            println!("{}", serde_json::to_string_pretty(&result.status)?);

            if let Some(error) = result.error {
                eprintln!("Campaign failed: {}", error);
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Run {
            scenario,
            scenarios_dir,
        } => {
            let scenarios_dir =
                scenarios_dir.unwrap_or_else(|| PathBuf::from("scenarios"));
            let config = commands::run::RunConfig { scenarios_dir };

            let result = commands::run::run(&scenario, &config).await?;

            if result.passed {
                println!("PASS: {}", result.scenario_name);
            } else {
                println!("FAIL: {}", result.scenario_name);
                println!("  Failures:");
                for failure in &result.failures {
                    println!("    - {}", failure);
                }
            }
            if let Some(ref id) = result.campaign_id {
                println!("  Campaign: {}", id);
            }
            if !result.passed {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::GenerateScenario {
            outcome,
            budget,
            output,
        } => {
            let config = commands::generate::GenerateConfig {
                outcome,
                budget,
                output_dir: output.clone(),
            };

            commands::generate::generate(&config)?;
            println!("Generated scenario at: {}", output.display());
            Ok(())
        }
    }
}
