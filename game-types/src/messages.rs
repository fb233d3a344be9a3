use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{CardId, PlayerId};

/// Body of `POST /api/games` and `POST /api/games/{game}/players`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinGameRequest {
    pub player_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameCreatedResponse {
    pub game_token: String,
    pub player_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerJoinedResponse {
    pub player_token: String,
}

/// Player names in join order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerListResponse {
    pub players: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitWordRequest {
    pub word: String,
}

/// Guessed-player id -> card id. serde_json accepts and emits the integer
/// keys as JSON strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitGuessesRequest {
    pub guesses: BTreeMap<PlayerId, CardId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuessesResponse {
    pub guesses: BTreeMap<PlayerId, CardId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
