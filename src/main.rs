//! CLI entry point for `xray-evidence`.

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Utc;
use clap::{CommandFactory, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use xray_evidence::config::Config;
use xray_evidence::manifest::Manifest;
use xray_evidence::media_type::MEDIA_TYPES;
use xray_evidence::report::TestExecution;
use xray_evidence::{Content, EvidenceRequest, EvidenceStash};

#[derive(Parser)]
#[command(
    name = "xray-evidence",
    version,
    about = "Resolve test evidence into Xray attachment records"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Config file (overrides $XRAY_EVIDENCE_CONFIG)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a single attachment and print the record as JSON
    Attach {
        /// File to attach; its name becomes the attachment filename
        locator: Option<String>,
        /// Text content (used instead of reading the file)
        #[arg(long, conflicts_with = "data_file")]
        data: Option<String>,
        /// Read binary content from this file instead
        #[arg(long, value_name = "FILE")]
        data_file: Option<PathBuf>,
        /// Media type; overrides anything derived
        #[arg(long, value_name = "TYPE")]
        ctype: Option<String>,
        /// Directory relative locators are read from
        #[arg(long, value_name = "DIR")]
        base_dir: Option<PathBuf>,
    },
    /// Resolve every attachment of a manifest and write a report
    Batch {
        manifest: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
        /// Directory relative locators are read from (default: manifest directory)
        #[arg(long, value_name = "DIR")]
        base_dir: Option<PathBuf>,
        /// Allow test ids to be present on multiple manifest tests
        #[arg(long)]
        allow_duplicate_ids: bool,
    },
    /// List known extensions and their media types
    MediaTypes {
        #[arg(long)]
        json: bool,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
    /// Generate a man page
    Manpage,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match cli.config {
        Some(ref path) => xray_evidence::config::load_config_from(path),
        None => xray_evidence::config::load_config(),
    };

    let log_level = match cli.verbose {
        0 => config.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    setup_logging(log_level, &config);

    match cli.command {
        Commands::Attach {
            locator,
            data,
            data_file,
            ctype,
            base_dir,
        } => cmd_attach(
            locator,
            data,
            data_file.as_deref(),
            ctype,
            base_dir.as_deref(),
            &config,
        ),
        Commands::Batch {
            manifest,
            output,
            base_dir,
            allow_duplicate_ids,
        } => cmd_batch(
            &manifest,
            &output,
            base_dir.as_deref(),
            allow_duplicate_ids || config.evidence.allow_duplicate_ids,
            &config,
        ),
        Commands::MediaTypes { json } => cmd_media_types(json),
        Commands::Completions { shell } => cmd_completions(shell),
        Commands::Manpage => cmd_manpage(),
    }
}

/// Set up tracing with stderr output and optional file logging.
fn setup_logging(level: &str, config: &Config) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let log_dir = xray_evidence::config::cache_dir(config);
    if std::fs::create_dir_all(&log_dir).is_ok() {
        let file_appender = tracing_appender::rolling::never(&log_dir, "xray-evidence.log");
        let file_layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(file_appender);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .with(file_layer)
            .init();
    } else {
        // Fall back to stderr only
        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .init();
    }
}

/// Pick the directory relative locators resolve against.
fn base_dir_or(cli: Option<&Path>, config: &Config, fallback: &Path) -> PathBuf {
    cli.map(Path::to_path_buf)
        .or_else(|| config.evidence.base_dir.clone())
        .unwrap_or_else(|| fallback.to_path_buf())
}

fn cmd_attach(
    locator: Option<String>,
    data: Option<String>,
    data_file: Option<&Path>,
    ctype: Option<String>,
    base_dir: Option<&Path>,
    config: &Config,
) -> anyhow::Result<()> {
    let mut request = EvidenceRequest::new();
    if let Some(locator) = locator {
        request = request.locator(locator);
    }
    if let Some(text) = data {
        request = request.content(Content::Text(text));
    }
    if let Some(path) = data_file {
        let bytes = std::fs::read(path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        request = request.content(Content::Bytes(bytes));
    }
    if let Some(ctype) = ctype {
        request = request.content_type(ctype);
    }

    let cwd = std::env::current_dir()?;
    let base_dir = base_dir_or(base_dir, config, &cwd);
    let record = xray_evidence::resolver::resolve_once(&request, &base_dir)?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

fn cmd_batch(
    manifest_path: &Path,
    output: &Path,
    base_dir: Option<&Path>,
    allow_duplicate_ids: bool,
    config: &Config,
) -> anyhow::Result<()> {
    if !manifest_path.exists() {
        anyhow::bail!("manifest not found: {}", manifest_path.display());
    }

    let started = Utc::now();
    let manifest = Manifest::load(manifest_path)?;
    let manifest_dir = manifest_path.parent().unwrap_or(Path::new("."));
    let base_dir = base_dir_or(base_dir, config, manifest_dir);

    let pb = ProgressBar::new(manifest.evidence_count() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} Resolving [{bar:40.cyan/blue}] {pos}/{len}")
            .expect("valid template")
            .progress_chars("#>-"),
    );

    let mut stash = EvidenceStash::new();
    let results = manifest.resolve(
        &mut stash,
        &base_dir,
        allow_duplicate_ids,
        &|current, _total| {
            pb.set_position(current as u64);
        },
    );
    pb.finish_and_clear();
    let results = results?;

    let mut execution = TestExecution::new(&config.report, started);
    for result in results {
        execution.push(result);
    }
    execution.finish(Utc::now());
    execution.write_to(output)?;

    use humansize::{format_size, BINARY};
    let payload: usize = execution
        .tests()
        .iter()
        .flat_map(|t| t.evidence_records())
        .map(|r| r.data().len())
        .sum();
    println!();
    println!("  {:<25} {}", "Tests", execution.tests().len());
    println!("  {:<25} {}", "Evidences", manifest.evidence_count());
    println!(
        "  {:<25} {}",
        "Encoded payload",
        format_size(payload, BINARY)
    );
    println!("  {:<25} {}", "Report", output.display());
    println!();

    Ok(())
}

fn cmd_media_types(json: bool) -> anyhow::Result<()> {
    if json {
        let items: Vec<serde_json::Value> = MEDIA_TYPES
            .iter()
            .map(|(ext, ctype)| serde_json::json!({ "extension": ext, "contentType": ctype }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else {
        for (ext, ctype) in MEDIA_TYPES {
            println!("  {ext:<8} {ctype}");
        }
    }
    Ok(())
}

/// Generate shell completions and print to stdout.
fn cmd_completions(shell: clap_complete::Shell) -> anyhow::Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "xray-evidence", &mut std::io::stdout());
    Ok(())
}

/// Generate a man page and print to stdout.
fn cmd_manpage() -> anyhow::Result<()> {
    let cmd = Cli::command();
    let man = clap_mangen::Man::new(cmd);
    let mut buf = Vec::new();
    man.render(&mut buf)?;
    std::io::Write::write_all(&mut std::io::stdout(), &buf)?;
    Ok(())
}
