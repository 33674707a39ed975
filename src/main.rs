//! circuit-sizer entry point: loads a project, sizes every circuit and
//! prints the schedule.

use std::path::Path;
use std::process;

use circuit_sizer::config::ProjectConfig;
use circuit_sizer::io::export::export_csv;
use circuit_sizer::sizing::{CircuitReport, size_all};
use circuit_sizer::tables::ReferenceTables;
use circuit_sizer::telemetry::init_tracing;

/// Parsed CLI arguments.
struct CliArgs {
    project_path: Option<String>,
    preset: Option<String>,
    report_out: Option<String>,
    json: bool,
}

fn print_help() {
    eprintln!("circuit-sizer: branch circuit and feeder conductor sizing");
    eprintln!();
    eprintln!("Usage: circuit-sizer [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --project <path>       Load settings and circuits from a TOML project file");
    eprintln!("  --preset <name>        Use a built-in project (demo, feeders)");
    eprintln!("  --report-out <path>    Export the circuit schedule to CSV");
    eprintln!("  --json                 Print reports as JSON instead of text");
    eprintln!("  --help                 Show this help message");
    eprintln!();
    eprintln!("If no --project or --preset is given, the demo preset is used.");
    eprintln!("Set RUST_LOG (e.g. RUST_LOG=debug) to see engine logging on stderr.");
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        project_path: None,
        preset: None,
        report_out: None,
        json: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--project" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --project requires a path argument");
                    process::exit(1);
                }
                cli.project_path = Some(args[i].clone());
            }
            "--preset" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --preset requires a name argument");
                    process::exit(1);
                }
                cli.preset = Some(args[i].clone());
            }
            "--report-out" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --report-out requires a path argument");
                    process::exit(1);
                }
                cli.report_out = Some(args[i].clone());
            }
            "--json" => {
                cli.json = true;
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

fn print_text(reports: &[CircuitReport]) {
    for report in reports {
        println!("{report}");
    }

    let flagged: Vec<&CircuitReport> = reports.iter().filter(|r| !r.notices.is_empty()).collect();
    if flagged.is_empty() {
        return;
    }
    println!("\n--- Notices ---");
    for report in flagged {
        println!("{}:", report.name);
        for message in &report.notices.errors {
            println!("  ERROR    {message}");
        }
        for message in &report.notices.warnings {
            println!("  WARNING  {message}");
        }
    }
}

fn main() {
    let cli = parse_args();
    init_tracing(cli.json, tracing::Level::ERROR);

    // --project takes priority, then --preset, then the demo project
    let project = if let Some(ref path) = cli.project_path {
        match ProjectConfig::from_toml_file(Path::new(path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else if let Some(ref name) = cli.preset {
        match ProjectConfig::from_preset(name) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        ProjectConfig::demo()
    };

    let errors = project.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    let tables = ReferenceTables::standard();
    let reports = match size_all(&project.circuits, &project.settings, &tables) {
        Ok(reports) => reports,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    if cli.json {
        match serde_json::to_string_pretty(&reports) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: failed to serialize reports: {e}");
                process::exit(1);
            }
        }
    } else {
        print_text(&reports);
    }

    if let Some(ref path) = cli.report_out {
        if let Err(e) = export_csv(&reports, Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Circuit schedule written to {path}");
    }
}
