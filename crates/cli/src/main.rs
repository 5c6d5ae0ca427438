mod serve;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use hmsim_eval::{Environment, Registry, Simulator, SimulatorConfig, MAX_DEPTH};
use tracing_subscriber::EnvFilter;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Heavy-metal reaction simulator and water-quality toolkit.
#[derive(Parser)]
#[command(
    name = "hmsim",
    version,
    about = "Heavy-metal reaction simulator and water-quality toolkit"
)]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Log filter used when RUST_LOG is unset (e.g. "info", "hmsim_eval=debug")
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that a reaction registry file loads
    Validate {
        /// Path to the registry JSON file
        registry: PathBuf,
    },

    /// Derive the reaction chain for a set of input compounds
    Simulate {
        /// Path to the registry JSON file
        registry: PathBuf,
        /// Input compound (repeatable, or comma-separated)
        #[arg(long = "compound", short = 'c', value_delimiter = ',')]
        compounds: Vec<String>,
        /// Environmental parameter as NAME=VALUE (repeatable)
        #[arg(long = "env", short = 'e', value_parser = parse_env_pair)]
        environment: Vec<(String, f64)>,
        /// Maximum number of reactions to fire
        #[arg(long, default_value_t = MAX_DEPTH)]
        max_depth: usize,
    },

    /// Compute HPI, HEI and Cd for a water sample
    Indices {
        /// Path to the sample JSON file
        sample: PathBuf,
    },

    /// Start the hmsim HTTP API server
    Serve {
        /// Port to listen on
        #[arg(long, default_value = "8080")]
        port: u16,
        /// Path to the registry JSON file loaded at startup
        registry: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.log_level, cli.quiet);

    match cli.command {
        Commands::Validate { registry } => {
            cmd_validate(&registry, cli.output, cli.quiet);
        }
        Commands::Simulate {
            registry,
            compounds,
            environment,
            max_depth,
        } => {
            let environment: Environment = environment.into_iter().collect();
            cmd_simulate(
                &registry,
                &compounds,
                &environment,
                max_depth,
                cli.output,
                cli.quiet,
            );
        }
        Commands::Indices { sample } => {
            cmd_indices(&sample, cli.output, cli.quiet);
        }
        Commands::Serve { port, registry } => {
            let rt = match tokio::runtime::Runtime::new() {
                Ok(rt) => rt,
                Err(e) => {
                    eprintln!("error: failed to create tokio runtime: {}", e);
                    process::exit(1);
                }
            };
            if let Err(e) = rt.block_on(serve::start_server(port, registry)) {
                eprintln!("Server error: {}", e);
                process::exit(1);
            }
        }
    }
}

/// Install a stderr subscriber. `RUST_LOG` wins over `--log-level`.
fn init_tracing(log_level: &str, quiet: bool) {
    let fallback = if quiet { "error" } else { log_level };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn parse_env_pair(raw: &str) -> Result<(String, f64), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", raw))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing parameter name in '{}'", raw));
    }
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", value.trim()))?;
    Ok((name.to_string(), value))
}

fn load_registry_or_exit(path: &Path, output: OutputFormat, quiet: bool) -> Registry {
    match Registry::from_path(path) {
        Ok(registry) => registry,
        Err(e) => {
            let msg = format!("error: registry failed to load: {}", e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    }
}

fn cmd_validate(registry_path: &Path, output: OutputFormat, quiet: bool) {
    let registry = load_registry_or_exit(registry_path, output, quiet);

    match output {
        OutputFormat::Text => {
            if !quiet {
                println!(
                    "valid registry: {} element blocks, {} rules",
                    registry.len(),
                    registry.rule_count()
                );
            }
        }
        OutputFormat::Json => {
            print_json(&registry.summary(), output, quiet);
        }
    }
}

fn cmd_simulate(
    registry_path: &Path,
    compounds: &[String],
    environment: &Environment,
    max_depth: usize,
    output: OutputFormat,
    quiet: bool,
) {
    let registry = load_registry_or_exit(registry_path, output, quiet);

    let report = Simulator::new(&registry)
        .with_config(SimulatorConfig { max_depth })
        .run_detailed(compounds, environment);

    match output {
        OutputFormat::Text => {
            if report.chain.is_empty() {
                println!("no reactions fired");
            }
            for (i, step) in report.chain.iter().enumerate() {
                println!(
                    "{}. [{}] {}  =>  {}",
                    i + 1,
                    step.reaction_type,
                    step.equation,
                    step.product
                );
            }
            if !quiet {
                println!();
                println!("compounds: {}", report.working_set.compounds().join(", "));
                if !report.fixpoint {
                    println!("stopped at depth bound ({})", max_depth);
                }
            }
        }
        OutputFormat::Json => {
            print_json(&report.chain, output, quiet);
        }
    }
}

fn cmd_indices(sample_path: &Path, output: OutputFormat, quiet: bool) {
    let text = match std::fs::read_to_string(sample_path) {
        Ok(s) => s,
        Err(e) => {
            let msg = format!("error reading file '{}': {}", sample_path.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let sample = match hmsim_quality::Sample::from_json(&text) {
        Ok(s) => s,
        Err(e) => {
            let msg = format!("error: {} in '{}'", e, sample_path.display());
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let result = hmsim_quality::analyze(&sample);

    match output {
        OutputFormat::Text => {
            let show = |v: Option<f64>| v.map_or_else(|| "n/a".to_string(), |v| format!("{:.2}", v));
            println!("SampleID: {}", result.sample_id);
            println!("HPI: {} -> {}", show(result.hpi), result.hpi_category);
            println!("HEI: {} -> {}", show(result.hei), result.hei_category);
            println!("Cd: {} -> {}", show(result.cd), result.cd_category);
            println!("Overall Conclusion: {}", result.conclusion);
        }
        OutputFormat::Json => {
            print_json(&result, output, quiet);
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T, output: OutputFormat, quiet: bool) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => {
            let msg = format!("error: failed to serialize output: {}", e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    }
}

/// Report an error message in the appropriate output format.
pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        }
    }
}
