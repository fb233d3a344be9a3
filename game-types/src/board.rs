use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{CardId, GamePhase, PlayerId};

/// One player's view of a game, computed fresh per request. Everything a
/// client may learn about the session passes through this shape; redaction
/// of other players' private data happens while building it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardView {
    pub phase: GamePhase,
    pub round: u32,
    /// Player ids ranked best-first, ties broken by join order.
    pub scoreboard_order: Vec<PlayerId>,
    #[serde(rename = "self")]
    pub own: SelfView,
    pub players: Vec<PlayerView>,
    /// The round's guessable deck; only present during assign-words and
    /// score.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cards: Option<Vec<CardView>>,
    /// The card currently up for disclosure; only present during score.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currently_scored: Option<CurrentlyScoredView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: String,
    pub is_ready: bool,
    pub is_self: bool,
    pub letters: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all_words_assigned: Option<bool>,
    pub score_total: u32,
    pub score_own_words: u32,
    pub score_correct_guesses: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelfView {
    /// The viewer's private prompt card for the round.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<PromptCardView>,
    pub letters: String,
    pub is_ready: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptCardView {
    pub id: CardId,
    pub text: String,
}

/// A deck entry as one viewer sees it. `player_id` stays null until the
/// card's ownership is revealed, except on the viewer's own card; deck
/// cards never carry prompt text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardView {
    pub id: CardId,
    pub is_self: bool,
    pub player_id: Option<PlayerId>,
    pub score: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentlyScoredView {
    pub player_id: PlayerId,
    pub word: String,
    /// Guesser id -> the card that guesser picked for this card's owner.
    pub guesses: BTreeMap<PlayerId, CardId>,
}
