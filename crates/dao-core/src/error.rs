use thiserror::Error;

#[derive(Debug, Error)]
pub enum DaoError {
    #[error("scheme not found: {0}")]
    TaskNotFound(u64),

    #[error("rival not found: {0}")]
    NemesisNotFound(u64),

    #[error("journal entry not found: {0}")]
    JournalEntryNotFound(u64),

    #[error("invalid day '{0}': expected monday..sunday")]
    InvalidDay(String),

    #[error("invalid difficulty '{0}': expected easy, medium, hard, scene or venerable-scene")]
    InvalidDifficulty(String),

    #[error("invalid goal field '{0}'")]
    InvalidGoalField(String),

    #[error("invalid amount {0}: must be a positive number")]
    InvalidAmount(i64),

    #[error("invalid essence value {0}: must not be negative")]
    InvalidPoints(i64),

    #[error("invalid user id '{0}': must be 1-64 lowercase alphanumeric, '-' or '_' characters")]
    InvalidUserId(String),

    #[error("no tribulation is active")]
    NoTribulation,

    #[error("tribulation '{0}' has already been resolved")]
    TribulationResolved(String),

    #[error("reward not ready: {progress}/{goal} essence gathered")]
    RewardNotReady { progress: i64, goal: i64 },

    #[error("oracle error: {0}")]
    Oracle(String),

    #[error("oracle not configured: set oracle.command in config.yaml")]
    OracleNotConfigured,

    #[error("home directory not found: set HOME environment variable")]
    HomeNotFound,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DaoError>;
