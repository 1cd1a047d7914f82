use super::{read_input, Context};
use crate::output::print_json;
use anyhow::Context as _;
use clap::Subcommand;
use std::path::{Path, PathBuf};

#[derive(Subcommand)]
pub enum DataSubcommand {
    /// Write all progress as JSON to stdout or a file
    Export {
        #[arg(long, short = 'o')]
        out: Option<PathBuf>,
    },
    /// Replace all progress with an exported JSON file ('-' for stdin)
    Import { file: PathBuf },
    /// Erase all progress for the current user
    Reset {
        /// Required: confirm the reset
        #[arg(long)]
        yes: bool,
    },
}

pub fn run(ctx: &Context, subcmd: DataSubcommand) -> anyhow::Result<()> {
    match subcmd {
        DataSubcommand::Export { out } => export(ctx, out.as_deref()),
        DataSubcommand::Import { file } => import(ctx, &file),
        DataSubcommand::Reset { yes } => reset(ctx, yes),
    }
}

fn export(ctx: &Context, out: Option<&Path>) -> anyhow::Result<()> {
    let engine = ctx.open()?;
    let json = engine.export()?;
    match out {
        Some(path) => {
            dao_core::io::atomic_write(path, json.as_bytes())
                .with_context(|| format!("failed to write {}", path.display()))?;
            if ctx.json {
                print_json(&serde_json::json!({ "path": path }))?;
            } else {
                println!("Exported to {}", path.display());
            }
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn import(ctx: &Context, file: &Path) -> anyhow::Result<()> {
    let raw = read_input(file)?;
    let mut engine = ctx.open()?;
    engine
        .import(&raw, &ctx.moment())
        .context("import rejected: not a valid export")?;
    let stats = &engine.data().stats;
    if ctx.json {
        print_json(&serde_json::json!({
            "imported": true,
            "rank": stats.rank,
            "total_points": stats.total_points,
        }))?;
    } else {
        println!("Imported: {} with {} essence", stats.rank, stats.total_points);
    }
    Ok(())
}

fn reset(ctx: &Context, yes: bool) -> anyhow::Result<()> {
    if !yes {
        anyhow::bail!("refusing to erase progress without --yes");
    }
    let mut engine = ctx.open()?;
    let removed = engine.reset(&ctx.moment())?;
    if ctx.json {
        print_json(&serde_json::json!({ "reset": removed }))?;
    } else if removed {
        println!("Progress reset. Your cultivation journey begins anew.");
    } else {
        println!("Nothing stored; already at the beginning.");
    }
    Ok(())
}
