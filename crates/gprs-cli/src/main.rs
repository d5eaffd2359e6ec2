use std::fs;
use std::io::stderr;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use glob::glob;
use gprs_core::text::parse_hex_packet;
use gprs_core::{DecodeError, Decoded, StopReason, decode_packet};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (commit ",
    env!("GPRS_BUILD_COMMIT"),
    ", ",
    env!("GPRS_BUILD_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "gprs")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Decoder for GPRS tracker report and diagnostic packets.",
    long_about = None,
    after_help = "Examples:\n  gprs decode 0200...03 --stdout\n  gprs decode \"0x02 0x00 0x0b ...\" -o decoded.json\n  gprs decode --file 'captures/*.hex' --stdout --pretty"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode framed packets given as hex or read from files.
    Decode(DecodeArgs),
}

#[derive(Args, Debug)]
struct DecodeArgs {
    /// Packets as hex text ("0x02 0x00 ..." or "0200...")
    packets: Vec<String>,

    /// Read packets from a file or glob pattern
    #[arg(short = 'f', long)]
    file: Option<PathBuf>,

    /// Files hold one raw binary frame instead of hex lines
    #[arg(long, requires = "file")]
    raw: bool,

    /// Output path (JSON)
    #[arg(short = 'o', long, required_unless_present = "stdout")]
    output: Option<PathBuf>,

    /// Write JSON to stdout
    #[arg(long, conflicts_with = "output")]
    stdout: bool,

    /// Pretty-print JSON output
    #[arg(long, conflicts_with = "compact")]
    pretty: bool,

    /// Compact JSON output (default)
    #[arg(long)]
    compact: bool,

    /// Log decoder steps and print a text dump of every record to stderr
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Suppress non-error output
    #[arg(long)]
    quiet: bool,

    /// Exit with a non-zero code if any packet failed or stopped early
    #[arg(long)]
    strict: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let Commands::Decode(args) = &cli.command;
    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(stderr)
        .with_ansi(false)
        .without_time()
        .with_env_filter(
            EnvFilter::try_from_env("GPRS_LOG").unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    debug!("{} {}", env!("CARGO_PKG_NAME"), LONG_VERSION);

    let result = match cli.command {
        Commands::Decode(args) => cmd_decode(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{err:#}"), None)
    }
}

/// One input packet and where it came from.
struct Input {
    source: String,
    bytes: Vec<u8>,
}

/// Per-packet entry of the output array.
#[derive(Debug, Serialize)]
struct PacketResult {
    source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    decoded: Option<Decoded>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl PacketResult {
    fn new(source: String, result: Result<Decoded, DecodeError>) -> Self {
        match result {
            Ok(decoded) => Self {
                source,
                decoded: Some(decoded),
                error: None,
            },
            Err(err) => Self {
                source,
                decoded: None,
                error: Some(err.to_string()),
            },
        }
    }

    fn is_incomplete(&self) -> bool {
        match &self.decoded {
            Some(decoded) => matches!(
                decoded.stop,
                StopReason::Aborted(_)
                    | StopReason::UnknownExtension(_)
                    | StopReason::TrailingBytes(_)
            ),
            None => true,
        }
    }
}

fn cmd_decode(args: DecodeArgs) -> Result<(), CliError> {
    let output = if args.stdout {
        None
    } else {
        Some(args.output.clone().ok_or_else(|| {
            CliError::new(
                "missing output path",
                Some("use -o/--output or --stdout".to_string()),
            )
        })?)
    };

    let inputs = collect_inputs(&args)?;
    if inputs.is_empty() {
        return Err(CliError::new(
            "no packets to decode",
            Some("pass hex packets as arguments or use --file".to_string()),
        ));
    }

    let mut results = Vec::with_capacity(inputs.len());
    for input in inputs {
        let result = decode_packet(&input.bytes, args.verbose);
        if args.verbose {
            print_dump(&input.source, &result);
        }
        results.push(PacketResult::new(input.source, result));
    }

    let json = serialize_results(&results, args.pretty, args.compact)?;
    let incomplete = results.iter().filter(|r| r.is_incomplete()).count();

    match output {
        None => println!("{}", json),
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create output directory: {}", parent.display())
                    })?;
                }
            }
            fs::write(&path, json)
                .with_context(|| format!("Failed to write output: {}", path.display()))?;
            if !args.quiet {
                eprintln!(
                    "OK: {} packet(s) decoded -> {}",
                    results.len(),
                    path.display()
                );
            }
        }
    }

    if args.strict && incomplete > 0 {
        return Err(CliError::new(
            format!("{} of {} packet(s) failed or stopped early", incomplete, results.len()),
            Some("rerun with --verbose to inspect each packet".to_string()),
        ));
    }
    Ok(())
}

fn print_dump(source: &str, result: &Result<Decoded, DecodeError>) {
    match result {
        Ok(decoded) => {
            eprintln!("{}: {:?}", source, decoded.packet_type);
            for record in &decoded.records {
                eprint!("{}", record);
            }
            if decoded.stop != StopReason::Exhausted {
                eprintln!("  stop: {:?}", decoded.stop);
            }
        }
        Err(err) => eprintln!("{}: {}", source, err),
    }
}

fn collect_inputs(args: &DecodeArgs) -> Result<Vec<Input>, CliError> {
    let mut inputs = Vec::new();
    for (index, text) in args.packets.iter().enumerate() {
        let bytes = parse_hex_packet(text).map_err(|err| {
            CliError::new(
                format!("invalid hex packet #{}: {}", index + 1, err),
                Some("use \"0x02 0x00 ...\" or contiguous hex".to_string()),
            )
        })?;
        inputs.push(Input {
            source: format!("arg:{}", index + 1),
            bytes,
        });
    }

    if let Some(file) = &args.file {
        for path in resolve_input_paths(file)? {
            inputs.extend(read_input_file(&path, args.raw)?);
        }
    }
    Ok(inputs)
}

fn read_input_file(path: &Path, raw: bool) -> Result<Vec<Input>, CliError> {
    validate_input_file(path)?;
    if raw {
        let bytes =
            fs::read(path).with_context(|| format!("Failed to read input: {}", path.display()))?;
        return Ok(vec![Input {
            source: path.display().to_string(),
            bytes,
        }]);
    }

    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read input: {}", path.display()))?;
    let mut inputs = Vec::new();
    for (number, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let source = format!("{}:{}", path.display(), number + 1);
        let bytes = parse_hex_packet(line).map_err(|err| {
            CliError::new(
                format!("invalid hex packet at {}: {}", source, err),
                Some("use --raw for binary capture files".to_string()),
            )
        })?;
        inputs.push(Input { source, bytes });
    }
    Ok(inputs)
}

fn serialize_results(
    results: &[PacketResult],
    pretty: bool,
    compact: bool,
) -> Result<String, CliError> {
    if pretty && compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }
    if pretty {
        serde_json::to_string_pretty(results)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(results)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

fn validate_input_file(input: &Path) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("check the path or quote the pattern".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("pass a file of hex lines, or a binary frame with --raw".to_string()),
        ));
    }
    Ok(())
}

fn resolve_input_paths(input: &Path) -> Result<Vec<PathBuf>, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(vec![input.to_path_buf()]);
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    if matches.is_empty() {
        return Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern".to_string()),
        ));
    }
    matches.sort();
    Ok(matches)
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
