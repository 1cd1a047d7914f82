mod cmd;
mod output;
mod root;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use cmd::{
    advisor::{AdvisorSubcommand, MindPalaceSubcommand},
    config::ConfigSubcommand,
    data::DataSubcommand,
    goal::GoalSubcommand,
    journal::JournalSubcommand,
    nemesis::NemesisSubcommand,
    reward::RewardSubcommand,
    schemes::SchemesSubcommand,
    task::TaskSubcommand,
    tribulation::TribulationSubcommand,
    Context,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "dao",
    about = "Dao of Benefits: cultivate your goals one scheme at a time",
    version,
    propagate_version = true
)]
struct Cli {
    /// Data directory (default: ~/.dao)
    #[arg(long, global = true, env = "DAO_ROOT")]
    root: Option<PathBuf>,

    /// Cultivator whose progress to use (default: config default_user, else demo)
    #[arg(long, short = 'u', global = true, env = "DAO_USER")]
    user: Option<String>,

    /// Pretend the local date is this day (YYYY-MM-DD)
    #[arg(long, global = true, env = "DAO_TODAY", hide = true)]
    today: Option<NaiveDate>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show rank, essence, aperture, streak and focus
    Status,

    /// Manage schemes on the weekly board
    Task {
        #[command(subcommand)]
        subcommand: TaskSubcommand,
    },

    /// Ask the oracle for schemes toward a goal
    Schemes {
        #[command(subcommand)]
        subcommand: SchemesSubcommand,
    },

    /// The weekly heavenly tribulation
    Tribulation {
        #[command(subcommand)]
        subcommand: TribulationSubcommand,
    },

    /// Gu refinement: the reward you work toward
    Reward {
        #[command(subcommand)]
        subcommand: RewardSubcommand,
    },

    /// Deduct essence as penance for a transgression
    Waste {
        amount: i64,
        /// What was wasted
        reason: Vec<String>,
    },

    /// Set the daily aperture (essence absorbable per day)
    Capacity { amount: i64 },

    /// Show or edit objectives and reflections
    Goal {
        #[command(subcommand)]
        subcommand: GoalSubcommand,
    },

    /// Write and review journal entries
    Journal {
        #[command(subcommand)]
        subcommand: JournalSubcommand,
    },

    /// Manage rivals
    Nemesis {
        #[command(subcommand)]
        subcommand: NemesisSubcommand,
    },

    /// Weekly counsel from the advisor
    Advisor {
        #[command(subcommand)]
        subcommand: AdvisorSubcommand,
    },

    /// The rendered image of your inner world
    MindPalace {
        #[command(subcommand)]
        subcommand: MindPalaceSubcommand,
    },

    /// Rank yourself against the Venerables and your rivals
    Leaderboard,

    /// Milestones, newest first
    History {
        /// Show at most this many entries
        #[arg(long, short = 'n')]
        limit: Option<usize>,
    },

    /// Achievements, locked and unlocked
    Achievements,

    /// Run due upkeep: expire tribulations and request what is due
    Refresh {
        /// Skip oracle requests even if one is configured
        #[arg(long)]
        offline: bool,
    },

    /// Export, import or reset stored progress
    Data {
        #[command(subcommand)]
        subcommand: DataSubcommand,
    },

    /// Inspect, validate or initialize config.yaml
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = root::resolve_root(cli.root.as_deref()).and_then(|root| {
        let ctx = Context::new(root, cli.user, cli.today, cli.json);
        run(&ctx, cli.command)
    });

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run(ctx: &Context, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Status => cmd::status::run(ctx),
        Commands::Task { subcommand } => cmd::task::run(ctx, subcommand),
        Commands::Schemes { subcommand } => cmd::schemes::run(ctx, subcommand),
        Commands::Tribulation { subcommand } => cmd::tribulation::run(ctx, subcommand),
        Commands::Reward { subcommand } => cmd::reward::run(ctx, subcommand),
        Commands::Waste { amount, reason } => cmd::reward::waste(ctx, amount, &reason.join(" ")),
        Commands::Capacity { amount } => cmd::reward::capacity(ctx, amount),
        Commands::Goal { subcommand } => cmd::goal::run(ctx, subcommand),
        Commands::Journal { subcommand } => cmd::journal::run(ctx, subcommand),
        Commands::Nemesis { subcommand } => cmd::nemesis::run(ctx, subcommand),
        Commands::Advisor { subcommand } => cmd::advisor::run(ctx, subcommand),
        Commands::MindPalace { subcommand } => cmd::advisor::run_mind_palace(ctx, subcommand),
        Commands::Leaderboard => cmd::board::leaderboard(ctx),
        Commands::History { limit } => cmd::board::history(ctx, limit),
        Commands::Achievements => cmd::board::achievements(ctx),
        Commands::Refresh { offline } => cmd::refresh::run(ctx, offline),
        Commands::Data { subcommand } => cmd::data::run(ctx, subcommand),
        Commands::Config { subcommand } => cmd::config::run(ctx, subcommand),
    }
}
