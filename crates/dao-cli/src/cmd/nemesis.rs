use super::{read_input, Context};
use crate::output::{print_json, print_table, report};
use anyhow::Context as _;
use clap::Subcommand;
use dao_core::nemesis::NemesisDraft;
use std::path::{Path, PathBuf};

#[derive(Subcommand)]
pub enum NemesisSubcommand {
    /// List rivals
    List,
    /// Add a rival from a JSON file ('-' for stdin)
    Add { file: PathBuf },
    /// Replace a rival's fields from a JSON file ('-' for stdin)
    Update { id: u64, file: PathBuf },
    /// Remove a rival
    Delete { id: u64 },
    /// Describe a rival in your own words and let the oracle shape it
    Customize {
        #[arg(required = true)]
        prompt: Vec<String>,
        /// Rework this rival instead of adding a new one
        #[arg(long)]
        id: Option<u64>,
    },
    /// Ask the oracle for a week of progress for every rival
    Advance,
}

pub fn run(ctx: &Context, subcmd: NemesisSubcommand) -> anyhow::Result<()> {
    match subcmd {
        NemesisSubcommand::List => list(ctx),
        NemesisSubcommand::Add { file } => add(ctx, &file),
        NemesisSubcommand::Update { id, file } => update(ctx, id, &file),
        NemesisSubcommand::Delete { id } => delete(ctx, id),
        NemesisSubcommand::Customize { prompt, id } => customize(ctx, &prompt.join(" "), id),
        NemesisSubcommand::Advance => advance(ctx),
    }
}

fn read_draft(file: &Path) -> anyhow::Result<NemesisDraft> {
    let raw = read_input(file)?;
    serde_json::from_str(&raw).context("rival must be JSON with name, title, rank and points")
}

fn list(ctx: &Context) -> anyhow::Result<()> {
    let engine = ctx.open()?;
    let rivals = &engine.data().nemesis;
    if ctx.json {
        return print_json(rivals);
    }
    if rivals.is_empty() {
        println!("No rivals yet.");
        return Ok(());
    }
    let rows = rivals
        .iter()
        .map(|n| {
            vec![
                n.id.to_string(),
                n.name.clone(),
                n.title.clone(),
                n.rank.clone(),
                n.points.to_string(),
                n.last_action.clone(),
            ]
        })
        .collect();
    print_table(&["ID", "NAME", "TITLE", "RANK", "ESSENCE", "LAST ACTION"], rows);
    Ok(())
}

fn add(ctx: &Context, file: &Path) -> anyhow::Result<()> {
    let draft = read_draft(file)?;
    let mut engine = ctx.open()?;
    let (id, notices) = engine.add_nemesis(draft, &ctx.moment())?;
    report(
        ctx.json,
        &serde_json::json!({ "id": id }),
        &format!("Rival [{id}] added"),
        &notices,
    )
}

fn update(ctx: &Context, id: u64, file: &Path) -> anyhow::Result<()> {
    let draft = read_draft(file)?;
    let mut engine = ctx.open()?;
    let notices = engine.update_nemesis(id, draft, &ctx.moment())?;
    report(
        ctx.json,
        &serde_json::json!({ "id": id }),
        &format!("Rival [{id}] updated"),
        &notices,
    )
}

fn delete(ctx: &Context, id: u64) -> anyhow::Result<()> {
    let mut engine = ctx.open()?;
    let notices = engine.delete_nemesis(id, &ctx.moment())?;
    report(
        ctx.json,
        &serde_json::json!({ "id": id }),
        &format!("Rival [{id}] removed"),
        &notices,
    )
}

fn customize(ctx: &Context, prompt: &str, id: Option<u64>) -> anyhow::Result<()> {
    let oracle = ctx.oracle()?;
    let mut engine = ctx.open()?;
    let notices = engine
        .customize_nemesis(&oracle, prompt, id, &ctx.moment())
        .context("failed to shape rival")?;
    report(ctx.json, &engine.data().nemesis, "", &notices)
}

fn advance(ctx: &Context) -> anyhow::Result<()> {
    let oracle = ctx.oracle()?;
    let mut engine = ctx.open()?;
    let notices = engine.advance_rivals(&oracle, true, &ctx.moment())?;
    report(ctx.json, &engine.data().nemesis, "", &notices)
}
