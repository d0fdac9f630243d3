use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log_appender::analyze::{Analyzer, Filters, Granularity};
use log_appender::parse::{read_entries, EntryParser};
use log_appender::report::build_summary;
use log_appender::{AppenderConfig, LogAppender, NewlinePolicy};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Timestamped log writer
/// Appends `YYYY-MM-DD HH:MM:SS - message` lines to a log file and summarizes them.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    #[command(flatten)]
    target: TargetArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct TargetArgs {
    /// JSON config file (dir, file_name, newline_policy)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log directory [default: data]
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Log file name inside the directory [default: logs.txt]
    #[arg(long, global = true)]
    file_name: Option<String>,

    /// How to handle line breaks inside a message
    #[arg(long, global = true, value_enum)]
    newline_policy: Option<PolicyArg>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Append one line per message, in order
    Append {
        #[arg(required = true)]
        messages: Vec<String>,

        /// Do not echo appended lines
        #[arg(long, short)]
        quiet: bool,
    },
    /// Summarize the log file
    Show {
        /// Keyword filter (case-insensitive substring)
        #[arg(long)]
        keyword: Option<String>,

        /// Minimum timestamp (inclusive). Examples: "2025-09-05 14:00:00", "2025-09-05T14:00:00"
        #[arg(long, value_name = "DATETIME")]
        from: Option<String>,

        /// Maximum timestamp (exclusive)
        #[arg(long, value_name = "DATETIME")]
        to: Option<String>,

        /// Timeline granularity
        #[arg(long, default_value_t = GranularityArg::Hour, value_enum)]
        granularity: GranularityArg,

        /// Save summary JSON to this path
        #[arg(long)]
        json_out: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PolicyArg { Escape, Reject, Verbatim }
impl From<PolicyArg> for NewlinePolicy {
    fn from(v: PolicyArg) -> Self {
        match v { PolicyArg::Escape => NewlinePolicy::Escape, PolicyArg::Reject => NewlinePolicy::Reject, PolicyArg::Verbatim => NewlinePolicy::Verbatim }
    }
}

#[derive(Clone, Debug, ValueEnum)]
enum GranularityArg { Minute, Hour, Day }
impl From<GranularityArg> for Granularity {
    fn from(v: GranularityArg) -> Self {
        match v { GranularityArg::Minute => Granularity::Minute, GranularityArg::Hour => Granularity::Hour, GranularityArg::Day => Granularity::Day }
    }
}

impl TargetArgs {
    fn resolve(&self) -> Result<AppenderConfig> {
        let mut cfg = match self.config.as_deref() {
            Some(p) => AppenderConfig::load(p)?,
            None => AppenderConfig::default(),
        };
        if let Some(dir) = &self.dir { cfg.dir = dir.clone(); }
        if let Some(name) = &self.file_name { cfg.file_name = name.clone(); }
        if let Some(policy) = self.newline_policy { cfg.newline_policy = policy.into(); }
        Ok(cfg)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = cli.target.resolve()?;

    match cli.command {
        Command::Append { messages, quiet } => {
            let appender = LogAppender::new(cfg);
            for msg in &messages {
                let entry = appender
                    .append(msg)
                    .with_context(|| format!("Failed appending to {}", appender.path().display()))?;
                if !quiet { println!("Log added: {entry}"); }
            }
        }
        Command::Show { keyword, from, to, granularity, json_out } => {
            let path = cfg.log_path();
            let filters = Filters::parse(keyword.as_deref(), from.as_deref(), to.as_deref())?;
            let outcome = read_entries(&EntryParser::new(), &path)
                .with_context(|| format!("Failed reading {}", path.display()))?;

            let mut analyzer = Analyzer::new(granularity.into(), filters);
            analyzer.malformed_lines = outcome.malformed_lines;
            analyzer.consume(outcome.entries);
            let summary = build_summary(&analyzer);

            println!("====== SUMMARY ======");
            println!("Log file: {}", path.display());
            println!("Total entries (filtered): {}", summary.total_entries);
            println!("Malformed lines: {}", summary.malformed_lines);
            if let Some(first) = summary.first_log.as_deref() { println!("First log: {first}"); }
            if let Some(last) = summary.last_log.as_deref() { println!("Last log:  {last}"); }
            if !summary.timeline.is_empty() {
                println!("\nTimeline:");
                for (bucket, n) in &summary.timeline { println!("  {bucket}  {n:>6}"); }
            }

            if let Some(out) = json_out.as_deref() {
                std::fs::write(out, serde_json::to_vec_pretty(&summary)?)
                    .with_context(|| format!("Saving JSON to {}", out.display()))?;
                println!("Saved JSON -> {}", out.display());
            }
        }
    }

    Ok(())
}
