use serde::Serialize;
use std::fmt;

/// A user-facing message produced by a transition. Notices never abort a
/// transition; they describe what happened (or was refused) so a front end can
/// show it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    RankChanged {
        from: String,
        to: String,
        promoted: bool,
    },
    AchievementsUnlocked {
        names: Vec<String>,
    },
    CapacityReached {
        awarded: i64,
        requested: i64,
    },
    FocusRejected {
        reason: FocusRejection,
    },
    TribulationDescends {
        title: String,
    },
    TribulationSurvived {
        reward: i64,
    },
    TribulationFailed {
        penalty: i64,
        automatic: bool,
    },
    EssenceWasted {
        amount: i64,
        reason: String,
    },
    RewardClaimed {
        text: String,
    },
    RivalEmerges {
        name: String,
    },
    RivalsUpdated {
        count: usize,
    },
    /// An external call failed; state was left as it was.
    CollaboratorFailed {
        operation: String,
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusRejection {
    Full,
    AlreadyFocused,
}

impl Notice {
    /// Whether the notice reports a loss or refusal rather than progress.
    pub fn is_warning(&self) -> bool {
        match self {
            Notice::RankChanged { promoted, .. } => !promoted,
            Notice::CapacityReached { .. }
            | Notice::FocusRejected { .. }
            | Notice::TribulationFailed { .. }
            | Notice::EssenceWasted { .. }
            | Notice::CollaboratorFailed { .. } => true,
            _ => false,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::RankChanged { to, promoted: true, .. } => {
                write!(f, "Rank up! You have achieved the rank of {to}.")
            }
            Notice::RankChanged { from, to, .. } => {
                write!(f, "Your cultivation regresses from {from} to {to}.")
            }
            Notice::AchievementsUnlocked { names } => {
                write!(f, "Achievement unlocked: {}", names.join(", "))
            }
            Notice::CapacityReached { awarded, .. } => write!(
                f,
                "Aperture limit reached: only {awarded} more essence could be absorbed today."
            ),
            Notice::FocusRejected { reason: FocusRejection::Full } => {
                f.write_str("Focus list is full.")
            }
            Notice::FocusRejected {
                reason: FocusRejection::AlreadyFocused,
            } => f.write_str("Scheme is already in focus."),
            Notice::TribulationDescends { title } => {
                write!(f, "A heavenly tribulation descends: {title}")
            }
            Notice::TribulationSurvived { reward } => {
                write!(f, "Tribulation survived! You earned {reward} Primeval Essence.")
            }
            Notice::TribulationFailed { penalty, automatic } => {
                if *automatic {
                    write!(f, "The tribulation went unanswered for a week. You lost {penalty} Primeval Essence.")
                } else {
                    write!(f, "Tribulation failed. You lost {penalty} Primeval Essence.")
                }
            }
            Notice::EssenceWasted { amount, reason } => {
                write!(f, "{amount} Primeval Essence deducted for: {reason}.")
            }
            Notice::RewardClaimed { text } if text.is_empty() => {
                f.write_str("Gu refined! You have claimed your reward.")
            }
            Notice::RewardClaimed { text } => write!(f, "Gu refined! You have claimed: {text}"),
            Notice::RivalEmerges { name } => write!(f, "A rival emerges: {name}"),
            Notice::RivalsUpdated { count } => write!(f, "{count} rival(s) advanced."),
            Notice::CollaboratorFailed { operation, message } => {
                write!(f, "{operation} failed: {message}")
            }
        }
    }
}
