use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::info;

use game_core::{CardDeck, GameSession, generate_token};
use game_types::{GameCreatedResponse, GameError};

/// Owns every live game session, addressed by game token. The registry
/// lock guards only creation and lookup; each session carries its own
/// mutex, held for the duration of a single game operation. Sessions live
/// until process end.
pub struct SessionRegistry {
    games: RwLock<HashMap<String, Arc<Mutex<GameSession>>>>,
    deck: Arc<CardDeck>,
}

impl SessionRegistry {
    pub fn new(deck: CardDeck) -> Self {
        Self {
            games: RwLock::new(HashMap::new()),
            deck: Arc::new(deck),
        }
    }

    /// Creates a session with its first player joined and returns both
    /// freshly issued tokens.
    pub async fn create_game(&self, player_name: &str) -> Result<GameCreatedResponse, GameError> {
        let mut games = self.games.write().await;
        let mut token = generate_token();
        while games.contains_key(&token) {
            token = generate_token();
        }
        let mut session = GameSession::new(token.clone(), self.deck.clone());
        let player_token = session.join(player_name)?;
        games.insert(token.clone(), Arc::new(Mutex::new(session)));
        info!(game = %token, "created game");
        Ok(GameCreatedResponse {
            game_token: token,
            player_token,
        })
    }

    pub async fn find(&self, game_token: &str) -> Option<Arc<Mutex<GameSession>>> {
        self.games.read().await.get(game_token).cloned()
    }

    pub async fn game_count(&self) -> usize {
        self.games.read().await.len()
    }
}
