//! The generative collaborator boundary.
//!
//! Every request is an operation name plus a JSON payload, answered with a
//! JSON value. The typed helpers below build the payloads from the aggregate
//! and parse the answers into drafts; nothing here mutates state.

use crate::advisor::{summarize_week, AdvisorDraft};
use crate::clock::Moment;
use crate::config::OracleConfig;
use crate::error::{DaoError, Result};
use crate::model::{AppData, JournalAnalysis, Task};
use crate::nemesis::NemesisDraft;
use crate::tribulation::TribulationDraft;
use crate::types::Difficulty;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::{Read, Write};
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

pub const OP_SCHEMES: &str = "schemes";
pub const OP_TRIBULATION: &str = "tribulation";
pub const OP_NEMESIS: &str = "nemesis";
pub const OP_UPDATE_NEMESIS: &str = "update-nemesis";
pub const OP_CUSTOMIZE_NEMESIS: &str = "customize-nemesis";
pub const OP_ADVISOR: &str = "advisor";
pub const OP_JOURNAL_ANALYSIS: &str = "journal-analysis";
pub const OP_REFINE_BENEFITS: &str = "refine-benefits";
pub const OP_MIND_PALACE: &str = "mind-palace";

/// How many recent milestones are described to the mind-palace renderer.
const MIND_PALACE_MILESTONES: usize = 3;

pub trait Oracle {
    fn invoke(&self, operation: &str, request: &Value) -> Result<Value>;
}

fn call<Req: Serialize, Resp: DeserializeOwned>(
    oracle: &dyn Oracle,
    operation: &str,
    request: &Req,
) -> Result<Resp> {
    let payload = serde_json::to_value(request)?;
    tracing::debug!(operation, "oracle request");
    let answer = oracle.invoke(operation, &payload)?;
    serde_json::from_value(answer)
        .map_err(|e| DaoError::Oracle(format!("{operation}: unexpected response: {e}")))
}

// ---------------------------------------------------------------------------
// Requests and responses
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct SchemesRequest<'a> {
    goal: &'a str,
    objective: &'a str,
    short_term_goal: &'a str,
}

/// A scheme proposed by the collaborator, not yet on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemeDraft {
    pub text: String,
    #[serde(default)]
    pub benefits: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub actual_points: Option<i64>,
}

impl SchemeDraft {
    pub fn into_task(self, id: u64) -> Task {
        let points = self
            .actual_points
            .unwrap_or_else(|| self.difficulty.default_points())
            .max(0);
        Task::new(id, self.text, self.difficulty)
            .with_benefits(self.benefits)
            .with_points(points)
    }
}

#[derive(Debug, Deserialize)]
struct SchemesResponse {
    schemes: Vec<SchemeDraft>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TribulationRequest<'a> {
    rank: &'a str,
    recent_achievements: String,
    objective: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NemesisRequest<'a> {
    user_rank: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CustomizeNemesisRequest<'a> {
    prompt: &'a str,
    user_rank: &'a str,
    objective: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    existing_nemesis: Option<NemesisDraft>,
}

#[derive(Debug, Serialize)]
struct JournalRequest<'a> {
    entry: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RefineRequest<'a> {
    objective: &'a str,
    short_term_goal: &'a str,
    motivation: &'a str,
    distractions: &'a str,
    task: &'a str,
    benefits: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefineResponse {
    refined_benefits: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MindPalaceRequest<'a> {
    objective: &'a str,
    short_term_goal: &'a str,
    motivation: &'a str,
    distractions: &'a str,
    recent_milestones: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MindPalaceResponse {
    image_url: String,
}

// ---------------------------------------------------------------------------
// Typed helpers
// ---------------------------------------------------------------------------

pub fn generate_schemes(oracle: &dyn Oracle, data: &AppData, goal: &str) -> Result<Vec<SchemeDraft>> {
    let resp: SchemesResponse = call(
        oracle,
        OP_SCHEMES,
        &SchemesRequest {
            goal,
            objective: &data.objective,
            short_term_goal: &data.short_term_goal,
        },
    )?;
    Ok(resp.schemes)
}

pub fn generate_tribulation(oracle: &dyn Oracle, data: &AppData) -> Result<TribulationDraft> {
    let unlocked: Vec<&str> = data
        .stats
        .achievements
        .iter()
        .filter(|(_, &on)| on)
        .map(|(k, _)| k.as_str())
        .collect();
    call(
        oracle,
        OP_TRIBULATION,
        &TribulationRequest {
            rank: &data.stats.rank,
            recent_achievements: unlocked.join(", "),
            objective: &data.objective,
        },
    )
}

pub fn generate_nemesis(oracle: &dyn Oracle, data: &AppData) -> Result<NemesisDraft> {
    call(
        oracle,
        OP_NEMESIS,
        &NemesisRequest {
            user_rank: &data.stats.rank,
        },
    )
}

/// A week of progress for an existing rival.
pub fn update_nemesis(oracle: &dyn Oracle, current: &NemesisDraft) -> Result<NemesisDraft> {
    call(oracle, OP_UPDATE_NEMESIS, current)
}

/// A rival shaped by the user's own description, optionally reworking an
/// existing one.
pub fn customize_nemesis(
    oracle: &dyn Oracle,
    data: &AppData,
    prompt: &str,
    existing: Option<NemesisDraft>,
) -> Result<NemesisDraft> {
    call(
        oracle,
        OP_CUSTOMIZE_NEMESIS,
        &CustomizeNemesisRequest {
            prompt,
            user_rank: &data.stats.rank,
            objective: &data.objective,
            existing_nemesis: existing,
        },
    )
}

pub fn advise(oracle: &dyn Oracle, data: &AppData, moment: &Moment) -> Result<AdvisorDraft> {
    call(oracle, OP_ADVISOR, &summarize_week(data, moment))
}

pub fn analyze_journal(oracle: &dyn Oracle, entry: &str) -> Result<JournalAnalysis> {
    call(oracle, OP_JOURNAL_ANALYSIS, &JournalRequest { entry })
}

pub fn refine_benefits(oracle: &dyn Oracle, data: &AppData, task: &Task) -> Result<String> {
    let resp: RefineResponse = call(
        oracle,
        OP_REFINE_BENEFITS,
        &RefineRequest {
            objective: &data.objective,
            short_term_goal: &data.short_term_goal,
            motivation: &data.motivation,
            distractions: &data.distractions,
            task: &task.text,
            benefits: &task.benefits,
        },
    )?;
    Ok(resp.refined_benefits)
}

pub fn render_mind_palace(oracle: &dyn Oracle, data: &AppData) -> Result<String> {
    let recent: Vec<&str> = data
        .milestones
        .iter()
        .take(MIND_PALACE_MILESTONES)
        .map(|m| m.title.as_str())
        .collect();
    let resp: MindPalaceResponse = call(
        oracle,
        OP_MIND_PALACE,
        &MindPalaceRequest {
            objective: &data.objective,
            short_term_goal: &data.short_term_goal,
            motivation: &data.motivation,
            distractions: &data.distractions,
            recent_milestones: if recent.is_empty() {
                "none yet".to_string()
            } else {
                recent.join(", ")
            },
        },
    )?;
    Ok(resp.image_url)
}

// ---------------------------------------------------------------------------
// CommandOracle
// ---------------------------------------------------------------------------

/// Answers requests by running an external command once per request.
///
/// The operation name is passed as the final argument, the request is
/// written to stdin as one JSON document and the answer is read from stdout.
/// A non-zero exit, a timeout or non-JSON output is an `Oracle` error
/// carrying whatever the command printed to stderr.
#[derive(Debug, Clone)]
pub struct CommandOracle {
    command: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandOracle {
    pub fn new(config: &OracleConfig) -> Self {
        Self {
            command: config.command.clone(),
            args: config.args.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// Build from an optional config section.
    pub fn from_config(config: Option<&OracleConfig>) -> Result<Self> {
        config.map(Self::new).ok_or(DaoError::OracleNotConfigured)
    }
}

impl Oracle for CommandOracle {
    fn invoke(&self, operation: &str, request: &Value) -> Result<Value> {
        let mut child = Command::new(&self.command)
            .args(&self.args)
            .arg(operation)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| DaoError::Oracle(format!("failed to start '{}': {e}", self.command)))?;

        // Drain before writing so a chatty command cannot stall on a full pipe.
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        if let Some(mut stdin) = child.stdin.take() {
            let mut buf = serde_json::to_vec(request)?;
            buf.push(b'\n');
            // A command that ignores its input may close stdin early.
            if let Err(e) = stdin.write_all(&buf) {
                tracing::debug!(operation, error = %e, "oracle closed stdin");
            }
        }

        let started = Instant::now();
        let status = loop {
            if let Some(status) = child.try_wait()? {
                break status;
            }
            if started.elapsed() >= self.timeout {
                let _ = child.kill();
                let _ = child.wait();
                return Err(DaoError::Oracle(format!(
                    "{operation}: timed out after {}s",
                    self.timeout.as_secs()
                )));
            }
            thread::sleep(Duration::from_millis(20));
        };

        let out = stdout.join().unwrap_or_default();
        let err = stderr.join().unwrap_or_default();

        if !status.success() {
            let code = status
                .code()
                .map_or_else(|| "signal".to_string(), |c| c.to_string());
            let mut msg = format!("{operation}: command exited with {code}");
            if !err.trim().is_empty() {
                msg.push_str(&format!("\nstderr: {}", err.trim()));
            }
            return Err(DaoError::Oracle(msg));
        }

        serde_json::from_str(out.trim())
            .map_err(|e| DaoError::Oracle(format!("{operation}: response is not JSON: {e}")))
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> thread::JoinHandle<String> {
    thread::spawn(move || {
        let mut buf = String::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_string(&mut buf);
        }
        buf
    })
}

// ---------------------------------------------------------------------------
// Test double
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Answers each operation with a canned value; unknown operations fail.
    #[derive(Default)]
    pub(crate) struct ScriptedOracle {
        answers: HashMap<String, Value>,
        pub(crate) calls: RefCell<Vec<(String, Value)>>,
    }

    impl ScriptedOracle {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn answer(mut self, operation: &str, value: Value) -> Self {
            self.answers.insert(operation.to_string(), value);
            self
        }

        pub(crate) fn called(&self, operation: &str) -> usize {
            self.calls
                .borrow()
                .iter()
                .filter(|(op, _)| op == operation)
                .count()
        }
    }

    impl Oracle for ScriptedOracle {
        fn invoke(&self, operation: &str, request: &Value) -> Result<Value> {
            self.calls
                .borrow_mut()
                .push((operation.to_string(), request.clone()));
            self.answers
                .get(operation)
                .cloned()
                .ok_or_else(|| DaoError::Oracle(format!("{operation}: no answer scripted")))
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
