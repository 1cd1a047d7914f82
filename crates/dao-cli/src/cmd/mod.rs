pub mod advisor;
pub mod board;
pub mod config;
pub mod data;
pub mod goal;
pub mod journal;
pub mod nemesis;
pub mod refresh;
pub mod reward;
pub mod schemes;
pub mod status;
pub mod task;
pub mod tribulation;

use anyhow::Context as _;
use chrono::NaiveDate;
use dao_core::clock::Moment;
use dao_core::config::Config;
use dao_core::engine::Engine;
use dao_core::oracle::CommandOracle;
use dao_core::session::Session;
use dao_core::store::FileStore;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Everything a command needs from the global flags.
pub struct Context {
    pub root: PathBuf,
    pub user: Option<String>,
    pub today: Option<NaiveDate>,
    pub json: bool,
}

impl Context {
    pub fn new(root: PathBuf, user: Option<String>, today: Option<NaiveDate>, json: bool) -> Self {
        Self {
            root,
            user,
            today,
            json,
        }
    }

    pub fn moment(&self) -> Moment {
        match self.today {
            Some(date) => Moment::on(date),
            None => Moment::now(),
        }
    }

    pub fn config(&self) -> anyhow::Result<Config> {
        Config::load(&self.root).context("failed to load config.yaml")
    }

    /// The session for `--user`, else the configured default user, else demo.
    pub fn session(&self, config: &Config) -> anyhow::Result<Session> {
        let user = self.user.as_deref().or(config.default_user.as_deref());
        Ok(Session::resolve(user)?)
    }

    pub fn open(&self) -> anyhow::Result<Engine<FileStore>> {
        let config = self.config()?;
        let session = self.session(&config)?;
        let engine = Engine::open(
            FileStore::new(&self.root),
            &session,
            config.daily_essence_capacity,
            &self.moment(),
        )
        .with_context(|| format!("failed to load progress for '{}'", session.namespace()))?;
        Ok(engine)
    }

    /// The configured oracle; an error if none is configured.
    pub fn oracle(&self) -> anyhow::Result<CommandOracle> {
        let config = self.config()?;
        Ok(CommandOracle::from_config(config.oracle.as_ref())?)
    }

    /// The configured oracle, if any.
    pub fn optional_oracle(&self) -> anyhow::Result<Option<CommandOracle>> {
        Ok(self.config()?.oracle.as_ref().map(CommandOracle::new))
    }
}

/// Read a file, or stdin when `path` is `-`.
pub fn read_input(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
