use clap::Parser;
use std::io;
use std::time::Instant;
use svtcl::generator;
use svtcl::ir::ParameterName;
use svtcl::output;
use svtcl::parser;

/// Sentaurus Visual Tcl script generator
#[derive(Parser)]
#[command(name = "svtcl", version)]
struct Cli {
    /// TOML request file describing the mode and its inputs
    #[arg(required_unless_present = "list_parameters")]
    request: Option<String>,

    /// Write the script to this file instead of stdout
    #[arg(short, long)]
    output: Option<String>,

    /// Print generation stats to stderr
    #[arg(long)]
    stats: bool,

    /// Print the accepted parameter names and exit
    #[arg(long)]
    list_parameters: bool,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if cli.list_parameters {
        for p in ParameterName::ALL {
            println!("{}", p);
        }
        return;
    }

    let request_path = cli.request.unwrap_or_default();

    let mut stats = if cli.stats { Some(svtcl::stats::Stats::new()) } else { None };

    let start = Instant::now();
    let input = std::fs::read_to_string(&request_path).unwrap_or_else(|e| {
        eprintln!("Error reading {}: {}", request_path, e);
        std::process::exit(1);
    });
    let request = parser::parse(&input).unwrap_or_else(|e| {
        eprintln!("{}", e);
        std::process::exit(1);
    });
    if let Some(ref mut s) = stats {
        s.add_phase("load request", start.elapsed());
    }

    let start = Instant::now();
    let script = generator::generate(&request).unwrap_or_else(|e| {
        eprintln!("Generation error: {}", e);
        std::process::exit(1);
    });
    if let Some(ref mut s) = stats {
        s.add_phase("generate", start.elapsed());
        s.count_script(&script);
    }

    let start = Instant::now();
    let written = match cli.output.as_deref() {
        Some(path) => output::save_script(&script, path),
        None => output::write_script(&script, &mut io::stdout().lock()),
    };
    written.unwrap_or_else(|e| {
        eprintln!("Output error: {}", e);
        std::process::exit(1);
    });
    if let Some(ref mut s) = stats {
        s.add_phase("write", start.elapsed());
    }

    if let Some(ref stats) = stats {
        stats.display();
    }
}
