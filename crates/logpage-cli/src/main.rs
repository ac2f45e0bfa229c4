use std::fs;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{ArgAction, Parser, ValueEnum};
use glob::glob;
use logpage_core::{
    ByteOrder, Config, DecodeError, DumpFileSource, GroupingMode, NvmeCliSource, Report,
    SourceError, decode_log_page,
};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter; overrides `-v`.
const LOG_ENV: &str = "LOGPAGE_LOG";

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("LOGPAGE_BUILD_COMMIT"),
    " ",
    env!("LOGPAGE_BUILD_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "logpage")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Decode an NVMe log page into named integer fields using a struct definition.",
    long_about = None,
    after_help = "Examples:\n  logpage \"__u32 freeblock_count; __u32 percentage_used;\"\n  logpage --schema-file vsmart.h --json\n  logpage --schema-file vsmart.h --input saved-dump.txt --grouping declared"
)]
struct Cli {
    /// Struct definition string (e.g. "__u32 freeblock_count; __u32 percentage_used;")
    #[arg(required_unless_present = "schema_file", conflicts_with = "schema_file")]
    schema: Option<String>,

    /// Read the struct definition from a file (e.g. a C header)
    #[arg(long, value_name = "PATH")]
    schema_file: Option<PathBuf>,

    /// Decode a saved `nvme get-log` dump instead of querying the device
    #[arg(long, value_name = "PATH")]
    input: Option<PathBuf>,

    /// JSON configuration file
    #[arg(short = 'c', long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// NVMe block device
    #[arg(long)]
    device: Option<String>,

    /// Log page identifier (decimal or 0x-prefixed hex)
    #[arg(long, value_parser = parse_log_id)]
    log_id: Option<u8>,

    /// Namespace identifier
    #[arg(long)]
    namespace: Option<u32>,

    /// nvme-cli executable
    #[arg(long, value_name = "PROGRAM")]
    nvme_bin: Option<String>,

    /// Run nvme without sudo
    #[arg(long)]
    no_sudo: bool,

    /// How bytes are grouped per field
    #[arg(long, value_enum)]
    grouping: Option<GroupingArg>,

    /// Byte order of each field
    #[arg(long, value_enum)]
    byte_order: Option<ByteOrderArg>,

    /// Write the report as JSON
    #[arg(long)]
    json: bool,

    /// Pretty-print JSON output (implies --json)
    #[arg(long)]
    pretty: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum GroupingArg {
    /// Four bytes per field, in declaration order
    Fixed,
    /// Each field's declared width at its declared offset
    Declared,
}

impl From<GroupingArg> for GroupingMode {
    fn from(value: GroupingArg) -> Self {
        match value {
            GroupingArg::Fixed => GroupingMode::Fixed,
            GroupingArg::Declared => GroupingMode::Declared,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ByteOrderArg {
    Little,
    Big,
}

impl From<ByteOrderArg> for ByteOrder {
    fn from(value: ByteOrderArg) -> Self {
        match value {
            ByteOrderArg::Little => ByteOrder::Little,
            ByteOrderArg::Big => ByteOrder::Big,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
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
        CliError::new(format!("{:#}", err), None)
    }
}

impl From<DecodeError> for CliError {
    fn from(err: DecodeError) -> Self {
        let hint = match &err {
            DecodeError::Source(SourceError::Spawn { .. }) => {
                Some("install nvme-cli, set --nvme-bin, or replay a saved dump with --input")
            }
            DecodeError::Source(SourceError::CommandFailed { .. }) => {
                Some("check --device and permissions; use --no-sudo when already root")
            }
            DecodeError::Source(_) => None,
            DecodeError::Dump(_) => {
                Some("check header_lines and payload_columns in the --config format section")
            }
            DecodeError::Group(_) => Some("the log page is shorter than the schema; check --log-id"),
            DecodeError::MissingGroup { .. } => {
                Some("fixed grouping reads 4 bytes per field; try --grouping declared")
            }
            DecodeError::Integer { .. } => None,
        };
        CliError::new(err.to_string(), hint.map(str::to_string))
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = apply_overrides(load_config(cli.config.as_deref())?, &cli);
    let schema = read_schema(&cli)?;
    let options = config.decode_options();
    debug!(?options, "decode options");

    let mut report = match cli.input.as_ref() {
        Some(input) => {
            let resolved = resolve_input_path(input)?;
            validate_input_file(&resolved)?;
            let mut source = DumpFileSource::open(&resolved)
                .with_context(|| format!("Failed to read dump file: {}", resolved.display()))?;
            decode_log_page(&schema, &mut source, &options)?
        }
        None => {
            let mut source = NvmeCliSource::new(config.nvme.clone());
            decode_log_page(&schema, &mut source, &options)?
        }
    };
    report.generated_at = now_rfc3339();
    info!(fields = report.fields.len(), source = %report.source, "decoded log page");

    if cli.json || cli.pretty {
        println!("{}", serialize_report(&report, cli.pretty)?);
    } else {
        print!("{}", report.render_text());
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config, CliError> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    Config::load(path).map_err(|err| {
        CliError::new(
            err.to_string(),
            Some("see the nvme/format/grouping/byte_order keys of the config file".to_string()),
        )
    })
}

fn apply_overrides(mut config: Config, cli: &Cli) -> Config {
    if let Some(device) = &cli.device {
        config.nvme.device = device.clone();
    }
    if let Some(log_id) = cli.log_id {
        config.nvme.log_id = log_id;
    }
    if let Some(namespace) = cli.namespace {
        config.nvme.namespace = namespace;
    }
    if let Some(program) = &cli.nvme_bin {
        config.nvme.program = program.clone();
    }
    if cli.no_sudo {
        config.nvme.sudo = false;
    }
    if let Some(grouping) = cli.grouping {
        config.grouping = grouping.into();
    }
    if let Some(byte_order) = cli.byte_order {
        config.byte_order = byte_order.into();
    }
    config
}

fn read_schema(cli: &Cli) -> Result<String, CliError> {
    match (&cli.schema, &cli.schema_file) {
        (Some(schema), _) => Ok(schema.clone()),
        (None, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read schema file: {}", path.display()))
            .map_err(Into::into),
        (None, None) => Err(CliError::new(
            "missing struct definition",
            Some("pass it as an argument or use --schema-file".to_string()),
        )),
    }
}

fn serialize_report(report: &Report, pretty: bool) -> Result<String, CliError> {
    let json = if pretty {
        serde_json::to_string_pretty(report)
    } else {
        serde_json::to_string(report)
    };
    json.context("JSON serialization failed").map_err(Into::into)
}

fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| logpage_core::DEFAULT_GENERATED_AT.to_string())
}

fn parse_log_id(value: &str) -> Result<u8, String> {
    let parsed = match value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
    {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => value.parse(),
    };
    parsed.map_err(|err| format!("invalid log page id '{}': {}", value, err))
}

fn validate_input_file(input: &Path) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("dump file not found: {}", input.display()),
            Some("save one with `nvme get-log ... > dump.txt`".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("dump path is not a file: {}", input.display()),
            None,
        ));
    }
    Ok(())
}

fn resolve_input_path(input: &Path) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.to_path_buf());
    }

    let invalid = |detail: String| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", detail)),
        )
    };
    let mut matches = Vec::new();
    for entry in glob(&pattern).map_err(|err| invalid(err.msg.to_string()))? {
        let path = entry.map_err(|err| invalid(err.to_string()))?;
        if path.is_file() {
            matches.push(path);
        }
    }

    match matches.len() {
        0 => Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern".to_string()),
        )),
        1 => Ok(matches.remove(0)),
        count => {
            let listed: Vec<String> = matches
                .iter()
                .take(3)
                .map(|p| p.display().to_string())
                .collect();
            let more = if count > 3 { ", ..." } else { "" };
            Err(CliError::new(
                format!(
                    "multiple files match pattern '{}' ({} matches); matches: {}{}",
                    pattern,
                    count,
                    listed.join(", "),
                    more
                ),
                Some("pass a single dump file".to_string()),
            ))
        }
    }
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains(['*', '?', '['])
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}
