use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use stega_inspect::config::{Config, load_config, resolve_db_path, resolve_export_path};
use stega_inspect::domain::email::MessageInfo;
use stega_inspect::domain::history::HistoryEntry;
use stega_inspect::mail::export::{ExportFormat, render_headers};
use stega_inspect::mail::source::{self, HeaderSource};
use stega_inspect::store::repo::VerdictRepository;
use stega_inspect::store::sqlite::SqliteRepo;
use stega_inspect::store::{epoch_now, record_and_prune};
use stega_inspect::terminal::{TuiContext, run_tui};
use stega_inspect::{VerdictResult, VerdictStatus, classify_signature, parse_headers};

#[derive(Parser)]
#[command(name = "stega_inspect")]
#[command(about = "Check the STEGA signature headers of a message", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Classify the signature of one message (.eml, header dump, or - for stdin)
    Check {
        path: Option<PathBuf>,

        /// Read input as a bare header dump: blank lines separate header
        /// blocks instead of ending the headers. Files other than `.eml` are
        /// always read this way; `.eml` files and stdin are cut at the body.
        #[arg(long)]
        dump: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Don't write this check to the history database
        #[arg(long)]
        no_history: bool,

        /// Exit with status 2 when the signature is flagged invalid
        #[arg(long)]
        strict: bool,
    },

    /// Print the parsed, unfolded headers
    Headers {
        path: Option<PathBuf>,

        /// Read input as a bare header dump: blank lines separate header
        /// blocks instead of ending the headers. Files other than `.eml` are
        /// always read this way; `.eml` files and stdin are cut at the body.
        #[arg(long)]
        dump: bool,

        #[arg(long, value_enum, default_value_t = ExportFormat::Text)]
        format: ExportFormat,
    },

    /// Open the terminal panel for one message
    Tui {
        path: Option<PathBuf>,

        /// Read input as a bare header dump: blank lines separate header
        /// blocks instead of ending the headers. Files other than `.eml` are
        /// always read this way; `.eml` files and stdin are cut at the body.
        #[arg(long)]
        dump: bool,

        /// Format used by the export key
        #[arg(long, value_enum, default_value_t = ExportFormat::Text)]
        export_format: ExportFormat,
    },

    /// List recent checks
    History {
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
}

#[derive(Serialize)]
struct Report<'a> {
    source: String,
    message: &'a MessageInfo,
    verdict: &'a VerdictResult,
}

fn open_history(cfg: &Config) -> Result<SqliteRepo> {
    let db_path = resolve_db_path(cfg)?;
    SqliteRepo::open(&db_path)
}

fn fetch(src: &dyn HeaderSource) -> Result<String> {
    src.fetch_raw_headers()
        .map_err(|e| anyhow!("Unable to read the headers from {}: {e:#}", src.label()))
}

fn print_report(report: &Report) {
    println!("status:    {}", report.verdict.status);
    println!("message:   {}", report.verdict.message);
    println!("from:      {}", report.message.from);
    println!("to:        {}", report.message.to);
    println!("subject:   {}", report.message.subject);
    println!("date:      {}", report.message.date);
    if let Some(sig) = &report.verdict.signature {
        println!("signature: {}", sig);
        println!(
            "timestamp: {}",
            report.verdict.timestamp.as_deref().unwrap_or("-")
        );
        println!(
            "verdict:   {}",
            report.verdict.verdict.as_deref().unwrap_or("-")
        );
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.cmd {
        Command::Check {
            path,
            dump,
            json,
            no_history,
            strict,
        } => {
            let cfg = load_config().map_err(|e| anyhow!("Configuration error: {e}"))?;
            let src = source::from_arg(path.as_deref(), dump);
            let raw = fetch(src.as_ref())?;

            let headers = parse_headers(&raw);
            let verdict = classify_signature(Some(&headers));
            let info = MessageInfo::from_headers(&headers);
            log::info!("{}: {}", src.label(), verdict.status);

            let report = Report {
                source: src.label(),
                message: &info,
                verdict: &verdict,
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }

            if cfg.record_history && !no_history {
                let entry = HistoryEntry::new(src.label(), &info.subject, &verdict, epoch_now());
                // best-effort; the verdict is already printed
                match open_history(&cfg)
                    .and_then(|repo| record_and_prune(&repo, &entry, cfg.keep_history))
                {
                    Ok(id) => log::debug!("recorded check #{id}"),
                    Err(e) => log::warn!("could not record verdict history: {e:#}"),
                }
            }

            if strict && verdict.status == VerdictStatus::Error {
                std::process::exit(2);
            }
            Ok(())
        }

        Command::Headers { path, dump, format } => {
            let src = source::from_arg(path.as_deref(), dump);
            let headers = parse_headers(&fetch(src.as_ref())?);
            print!("{}", render_headers(&headers, format)?);
            Ok(())
        }

        Command::Tui {
            path,
            dump,
            export_format,
        } => {
            let cfg = load_config().map_err(|e| anyhow!("Configuration error: {e}"))?;
            let reads_stdin = path.as_deref().is_none_or(|p| p == Path::new("-"));
            if reads_stdin && std::io::stdin().is_terminal() {
                return Err(anyhow!("tui needs a message path or piped input"));
            }
            let src = source::from_arg(path.as_deref(), dump);

            let repo = if cfg.record_history {
                Some(open_history(&cfg)?)
            } else {
                None
            };
            let ctx = TuiContext {
                source: src.as_ref(),
                history: repo.as_ref().map(|r| r as &dyn VerdictRepository),
                export_path: resolve_export_path(&cfg)?,
                export_format,
                keep_history: cfg.keep_history,
            };
            run_tui(&ctx).map_err(|e| anyhow!("{e:?}"))
        }

        Command::History { limit } => {
            let cfg = load_config().map_err(|e| anyhow!("Configuration error: {e}"))?;
            let repo = open_history(&cfg)?;
            let rows = repo.recent(limit)?;
            if rows.is_empty() {
                println!("No checks recorded yet.");
            }
            for e in rows {
                println!(
                    "#{:<5} {:<8} {:<10} {}  {}",
                    e.id.unwrap_or_default(),
                    e.status.as_str(),
                    e.checked_at_epoch,
                    e.subject,
                    e.source
                );
            }
            Ok(())
        }
    }
}
