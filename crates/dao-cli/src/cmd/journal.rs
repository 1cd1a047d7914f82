use super::Context;
use crate::output::{print_json, report};
use anyhow::Context as _;
use clap::Subcommand;
use dao_core::oracle::Oracle;

#[derive(Subcommand)]
pub enum JournalSubcommand {
    /// Write an entry (analyzed by the oracle when one is configured)
    Write {
        #[arg(required = true)]
        text: Vec<String>,
        /// Skip the analysis
        #[arg(long)]
        no_analysis: bool,
    },
    /// List entries, newest first
    List {
        #[arg(long, short = 'n')]
        limit: Option<usize>,
    },
    /// Re-run the analysis for an entry
    Analyze { id: u64 },
}

pub fn run(ctx: &Context, subcmd: JournalSubcommand) -> anyhow::Result<()> {
    match subcmd {
        JournalSubcommand::Write { text, no_analysis } => write(ctx, &text.join(" "), no_analysis),
        JournalSubcommand::List { limit } => list(ctx, limit),
        JournalSubcommand::Analyze { id } => analyze(ctx, id),
    }
}

fn write(ctx: &Context, text: &str, no_analysis: bool) -> anyhow::Result<()> {
    let oracle = if no_analysis { None } else { ctx.optional_oracle()? };
    let mut engine = ctx.open()?;
    let (id, notices) = engine.write_journal(
        text,
        oracle.as_ref().map(|o| o as &dyn Oracle),
        &ctx.moment(),
    )?;
    let entry = engine.data().journal_entries.iter().find(|e| e.id == id);
    report(ctx.json, &entry, &format!("Entry [{id}] recorded"), &notices)
}

fn list(ctx: &Context, limit: Option<usize>) -> anyhow::Result<()> {
    let engine = ctx.open()?;
    let entries: Vec<_> = engine
        .data()
        .journal_entries
        .iter()
        .take(limit.unwrap_or(usize::MAX))
        .collect();
    if ctx.json {
        return print_json(&entries);
    }
    if entries.is_empty() {
        println!("The journal is empty.");
        return Ok(());
    }
    for e in entries {
        println!("[{}] {}", e.id, e.date.format("%Y-%m-%d %H:%M"));
        println!("  {}", e.content);
        if let Some(a) = &e.analysis {
            println!("  sentiment: {}  themes: {}", a.sentiment, a.themes.join(", "));
        }
    }
    Ok(())
}

fn analyze(ctx: &Context, id: u64) -> anyhow::Result<()> {
    let oracle = ctx.oracle()?;
    let mut engine = ctx.open()?;
    let notices = engine
        .analyze_journal(&oracle, id, &ctx.moment())
        .context("failed to analyze entry")?;
    let entry = engine.data().journal_entries.iter().find(|e| e.id == id);
    report(ctx.json, &entry, &format!("Entry [{id}] analyzed"), &notices)
}
