use std::fmt;

use serde::{Deserialize, Serialize};

/// Public per-game player id. Assigned in join order starting at 0 and
/// never reused.
pub type PlayerId = u32;

/// Per-game card id, unique across all rounds of one game.
pub type CardId = u64;

/// Stage of the round's state machine. Transitions are monotone within a
/// round and cyclic across rounds: `score` wraps back to `wait-for-ready`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GamePhase {
    WaitForReady,
    SubmitWord,
    AssignWords,
    Score,
}

/// A player-initiated operation gated by the phase machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    Join,
    MarkReady,
    SubmitWord,
    SubmitGuesses,
    ReadGuesses,
    MarkScored,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::WaitForReady => "wait-for-ready",
            GamePhase::SubmitWord => "submit-word",
            GamePhase::AssignWords => "assign-words",
            GamePhase::Score => "score",
        }
    }

    /// Allowed-action table. An action attempted in any other phase is a
    /// forbidden-action error, never a silent no-op.
    pub fn allows(self, action: PlayerAction) -> bool {
        use PlayerAction::*;
        matches!(
            (self, action),
            (GamePhase::WaitForReady, Join | MarkReady)
                | (GamePhase::SubmitWord, SubmitWord)
                | (GamePhase::AssignWords, SubmitGuesses | ReadGuesses)
                | (GamePhase::Score, MarkScored)
        )
    }
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
