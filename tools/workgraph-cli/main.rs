use clap::{Parser, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use workgraph::prelude::*;

/// How the input file is wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum InputCli {
    /// Plain `{ "work_orders": [...] }` JSON
    Payload,
    /// The bare fenced message text returned by the service
    Message,
    /// The full `{ "message": "..." }` service response
    Response,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FormatCli {
    Json,
    Outline,
}

/// Materialize construction work orders into a project graph
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the input file; reads stdin when omitted
    input_path: Option<String>,

    /// Label of the project node
    #[arg(short, long)]
    label: Option<String>,

    /// How the input is wrapped
    #[arg(short, long, value_enum, default_value = "payload")]
    input: InputCli,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: FormatCli,

    /// Path to a JSON file with materializer options
    #[arg(short, long)]
    config: Option<String>,

    /// Fail on references to missing work orders instead of skipping them
    #[arg(long)]
    strict: bool,

    /// Print a timing summary to stderr
    #[arg(long)]
    summary: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(cli);
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) {
    let total_start = Instant::now();

    // --- 1. Options ---
    let mut options = match &cli.config {
        Some(path) => MaterializeOptions::from_file(path).unwrap_or_else(|e| {
            exit_with_error(&format!("Failed to load config '{}': {}", path, e))
        }),
        None => MaterializeOptions::default(),
    };
    if cli.strict {
        options.dangling = DanglingPolicy::Error;
    }
    let label = cli.label.clone().unwrap_or_else(|| options.root_label.clone());

    // --- 2. Loading ---
    let load_start = Instant::now();
    let raw = read_input(cli.input_path.as_deref());
    let load_duration = load_start.elapsed();

    // --- 3. Decoding ---
    let decode_start = Instant::now();
    let payload = decode(&raw, cli.input)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to decode input: {}", e)));
    let decode_duration = decode_start.elapsed();

    // --- 4. Materialization ---
    let materialize_start = Instant::now();
    let materializer = Materializer::new(options);
    let run = materializer
        .materialize_detailed(&payload, &label)
        .unwrap_or_else(|e| exit_with_error(&format!("Materialization failed: {}", e)));
    let materialize_duration = materialize_start.elapsed();

    // --- 5. Output ---
    match cli.format {
        FormatCli::Json => {
            let json = serde_json::to_string_pretty(&run.graph).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to serialize graph: {}", e))
            });
            println!("{}", json);
        }
        FormatCli::Outline => print!("{}", OutlineFormatter::format(&run.graph)),
    }

    if cli.summary {
        eprintln!("\n--- Project Summary ---");
        eprintln!("Work Orders:          {}", payload.work_orders.len());
        eprintln!("Nodes:                {}", run.graph.nodes.len());
        eprintln!("Edges:                {}", run.graph.edges.len());
        eprintln!("Total Cost:           {}", run.totals.cost);
        eprintln!("Total Duration:       {} days", run.totals.duration);
        eprintln!("\n--- Performance Summary ---");
        eprintln!("Input Loading:        {:?}", load_duration);
        eprintln!("Decoding:             {:?}", decode_duration);
        eprintln!("Materialization:      {:?}", materialize_duration);
        eprintln!("-----------------------------");
        eprintln!("Total Execution:      {:?}", total_start.elapsed());
    }
}

fn read_input(path: Option<&str>) -> String {
    match path {
        Some(path) => fs::read_to_string(path).unwrap_or_else(|e| {
            exit_with_error(&format!("Failed to read input file '{}': {}", path, e))
        }),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .unwrap_or_else(|e| exit_with_error(&format!("Failed to read stdin: {}", e)));
            buffer
        }
    }
}

fn decode(raw: &str, input: InputCli) -> std::result::Result<Payload, Box<dyn std::error::Error>> {
    let payload = match input {
        InputCli::Payload => Payload::from_json(raw)?,
        InputCli::Message => Payload::from_message(raw)?,
        InputCli::Response => serde_json::from_str::<ServiceResponse>(raw)?.into_payload()?,
    };
    Ok(payload)
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
