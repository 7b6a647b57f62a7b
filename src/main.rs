use anyhow::{Context, Result};
use clap::{Args, ColorChoice, CommandFactory, FromArgMatches, Parser, Subcommand};
use colored::Colorize;
use devpeek::render::render_human;
use devpeek::schema::ResultSet;
use devpeek::{Config, DetectionEngine, DetectorId, ToolId};
use std::io::Read;
use tracing_subscriber::EnvFilter;

/// Log filter, e.g. `DEVPEEK_LOG=devpeek=debug`.
const LOG_ENV: &str = "DEVPEEK_LOG";

#[derive(Parser)]
#[command(
    name = "devpeek",
    about = "Paste anything, see what it is",
    arg_required_else_help = true
)]
struct Cli {
    /// Disable color
    #[arg(long = "no-color", global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect formats in TEXT (or stdin) and show ranked previews
    Preview(PreviewArgs),
    /// List registered detectors in registration order
    Detectors,
    /// List the dedicated tools offered when nothing specific matches
    Tools,
    /// Print the JSON schema of `preview --json` output
    Schema,
}

#[derive(Args, Clone)]
struct PreviewArgs {
    /// Text to inspect; read from stdin when omitted
    text: Option<String>,

    /// Output JSON (stable schema)
    #[arg(long)]
    json: bool,

    /// Plain text without colors/headers
    #[arg(long)]
    raw: bool,

    /// Comma-separated detector ids to keep, e.g. json,jwt
    #[arg(long, value_name = "list")]
    only: Option<String>,
}

fn parse_only(list: &str) -> Result<Vec<DetectorId>, String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse::<DetectorId>)
        .collect()
}

fn read_input(text: Option<String>) -> Result<String> {
    match text {
        Some(text) => Ok(text),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn stdout_supports_color() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

fn run_preview(args: PreviewArgs, color: ColorChoice, config: &Config) -> Result<(), i32> {
    let only = match args.only.as_deref().map(parse_only).transpose() {
        Ok(only) => only,
        Err(e) => {
            eprintln!("{}", e);
            return Err(2);
        }
    };

    let input = match read_input(args.text) {
        Ok(input) => input,
        Err(e) => {
            eprintln!("{:#}", e);
            return Err(3);
        }
    };

    let engine = DetectionEngine::from_config(config);
    let mut results: ResultSet = engine.evaluate(&input);
    if let Some(ids) = only {
        results.retain_ids(&ids);
    }

    if args.json {
        match serde_json::to_string_pretty(&results) {
            Ok(s) => println!("{}", s),
            Err(_) => return Err(3),
        }
    } else {
        let want_color = stdout_supports_color() && !matches!(color, ColorChoice::Never);
        let rendered = render_human(
            &results,
            want_color,
            args.raw,
            config.output.show_fallback_tools,
        );
        if !rendered.is_empty() {
            println!("{}", rendered);
        }
    }
    Ok(())
}

fn list_detectors(color: bool, config: &Config) {
    let engine = DetectionEngine::from_config(config);
    for id in engine.detector_ids() {
        let name = if color {
            id.as_str().cyan().to_string()
        } else {
            id.as_str().to_string()
        };
        // pad before coloring would count escape codes
        let pad = " ".repeat(16usize.saturating_sub(id.as_str().len()));
        println!(
            "{}{}{:>4}  {:<18} {}",
            name,
            pad,
            id.priority(),
            id.label(),
            ToolId::for_detector(id)
        );
    }
}

fn list_tools() {
    for tool in ToolId::ALL {
        println!("{:<18} {}", tool.as_str(), tool.label());
    }
}

fn print_schema() -> Result<(), i32> {
    let schema = schemars::schema_for!(ResultSet);
    match serde_json::to_string_pretty(&schema) {
        Ok(s) => {
            println!("{}", s);
            Ok(())
        }
        Err(_) => Err(3),
    }
}

fn detect_color_choice() -> ColorChoice {
    // Scan args before clap so help/errors honor `--no-color`.
    // Mirror clap's parsing by stopping at `--` which terminates flags.
    let mut args = std::env::args_os();
    args.next();
    let mut flag = false;
    for arg in args {
        if arg == "--" {
            break;
        }
        if arg == "--no-color" {
            flag = true;
            break;
        }
    }
    if flag || std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()) {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

/// Detector panics are caught by the engine; keep them off the terminal.
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        if devpeek::engine::is_running_detector() {
            tracing::debug!(%info, "detector panic");
        } else {
            default_hook(info);
        }
    }));
}

fn main() {
    init_tracing();
    install_panic_hook();
    let color = detect_color_choice();
    if matches!(color, ColorChoice::Never) {
        colored::control::set_override(false);
    }
    let matches = Cli::command().color(color).get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());
    let config = Config::load();

    let result = match cli.command {
        Some(Commands::Preview(args)) => run_preview(args, color, &config),
        Some(Commands::Detectors) => {
            list_detectors(
                stdout_supports_color() && !matches!(color, ColorChoice::Never),
                &config,
            );
            Ok(())
        }
        Some(Commands::Tools) => {
            list_tools();
            Ok(())
        }
        Some(Commands::Schema) => print_schema(),
        None => Ok(()),
    };
    if let Err(code) = result {
        std::process::exit(code);
    }
}
