use crate::error::Result;
use crate::model::DEFAULT_DAILY_CAPACITY;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// OracleConfig
// ---------------------------------------------------------------------------

/// External command that answers generation requests. The operation name is
/// appended as the last argument; the request arrives as JSON on stdin and
/// the response is read as JSON from stdout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OracleConfig {
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    120
}

// ---------------------------------------------------------------------------
// Config (top-level)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    /// Aperture size given to a freshly created aggregate.
    #[serde(default = "default_capacity")]
    pub daily_essence_capacity: i64,
    /// Namespace used when no user is given on the command line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oracle: Option<OracleConfig>,
}

fn default_version() -> u32 {
    1
}

fn default_capacity() -> i64 {
    DEFAULT_DAILY_CAPACITY
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            daily_essence_capacity: default_capacity(),
            default_user: None,
            oracle: None,
        }
    }
}

impl Config {
    /// Load `config.yaml` from `root`, or the defaults when it does not exist.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        match crate::io::read_optional(&path)? {
            Some(data) => Ok(serde_yaml::from_str(&data)?),
            None => Ok(Self::default()),
        }
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.daily_essence_capacity <= 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!(
                    "daily_essence_capacity must be positive (got {})",
                    self.daily_essence_capacity
                ),
            });
        }

        if let Some(user) = &self.default_user {
            if paths::validate_user_id(user).is_err() {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!("default_user '{user}' is not a valid user id"),
                });
            }
        }

        match &self.oracle {
            None => warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "no oracle configured: generation commands are unavailable".to_string(),
            }),
            Some(oracle) => {
                if oracle.command.trim().is_empty() {
                    warnings.push(ConfigWarning {
                        level: WarnLevel::Error,
                        message: "oracle.command is empty".to_string(),
                    });
                }
                if oracle.timeout_secs == 0 {
                    warnings.push(ConfigWarning {
                        level: WarnLevel::Warning,
                        message: "oracle.timeout_secs is 0: every request will time out".to_string(),
                    });
                }
            }
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
