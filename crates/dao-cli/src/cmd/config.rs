use super::Context;
use crate::output::print_json;
use clap::Subcommand;
use dao_core::config::{Config, WarnLevel};
use dao_core::paths;

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show the effective configuration
    Show,
    /// Validate the config for common mistakes
    Validate,
    /// Write a config.yaml populated with the defaults
    Init {
        /// Replace an existing config.yaml
        #[arg(long)]
        force: bool,
    },
}

pub fn run(ctx: &Context, subcmd: ConfigSubcommand) -> anyhow::Result<()> {
    match subcmd {
        ConfigSubcommand::Show => show(ctx),
        ConfigSubcommand::Validate => validate(ctx),
        ConfigSubcommand::Init { force } => init(ctx, force),
    }
}

fn init(ctx: &Context, force: bool) -> anyhow::Result<()> {
    let path = paths::config_path(&ctx.root);
    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to replace it)", path.display());
    }
    Config::default().save(&ctx.root)?;
    tracing::info!(path = %path.display(), "wrote default config");
    if ctx.json {
        return print_json(&serde_json::json!({ "path": path }));
    }
    println!("Wrote {}", path.display());
    Ok(())
}

fn show(ctx: &Context) -> anyhow::Result<()> {
    let config = ctx.config()?;
    if ctx.json {
        return print_json(&config);
    }
    println!("Config file:     {}", paths::config_path(&ctx.root).display());
    println!("Daily capacity:  {}", config.daily_essence_capacity);
    println!(
        "Default user:    {}",
        config.default_user.as_deref().unwrap_or("(demo)")
    );
    match &config.oracle {
        Some(o) => {
            let mut line = o.command.clone();
            for arg in &o.args {
                line.push(' ');
                line.push_str(arg);
            }
            println!("Oracle:          {line} (timeout {}s)", o.timeout_secs);
        }
        None => println!("Oracle:          (none)"),
    }
    Ok(())
}

fn validate(ctx: &Context) -> anyhow::Result<()> {
    let config = ctx.config()?;
    let warnings = config.validate();

    if ctx.json {
        print_json(&serde_json::json!({ "warnings": warnings }))?;
    } else if warnings.is_empty() {
        println!("Config is valid. No warnings.");
    } else {
        for w in &warnings {
            let prefix = match w.level {
                WarnLevel::Warning => "warning",
                WarnLevel::Error => "error",
            };
            println!("[{prefix}] {}", w.message);
        }
    }

    if warnings.iter().any(|w| w.level == WarnLevel::Error) {
        anyhow::bail!("config validation found errors");
    }
    Ok(())
}
