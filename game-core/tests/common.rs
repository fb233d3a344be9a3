use std::collections::BTreeMap;
use std::sync::Arc;

use game_core::{CardDeck, GameSession};
use game_types::{CardId, PlayerId};

pub fn new_game() -> GameSession {
    GameSession::new("testgame0001".to_string(), Arc::new(CardDeck::builtin()))
}

/// Creates a game with the given players joined, returning their tokens.
pub fn game_with_players(names: &[&str]) -> (GameSession, Vec<String>) {
    let mut game = new_game();
    let tokens = names.iter().map(|name| game.join(name).unwrap()).collect();
    (game, tokens)
}

/// Three players joined and readied; phase is submit-word.
pub fn started_game() -> GameSession {
    let (mut game, _) = game_with_players(&["Anna", "Bert", "Cleo"]);
    for id in 0..3 {
        game.mark_ready(id).unwrap();
    }
    game
}

/// Each player submits the first three characters of their hand.
pub fn submit_short_words(game: &mut GameSession) {
    let ids: Vec<PlayerId> = game.players.iter().map(|p| p.id).collect();
    for id in ids {
        let word: String = game.players[id as usize].letters.chars().take(3).collect();
        game.submit_word(id, &word).unwrap();
    }
}

/// Three players with words submitted; phase is assign-words.
pub fn guessing_game() -> GameSession {
    let mut game = started_game();
    submit_short_words(&mut game);
    game
}

/// A guess set where `player` picks every other player's actual card.
pub fn correct_guesses_for(game: &GameSession, player: PlayerId) -> BTreeMap<PlayerId, CardId> {
    game.cards
        .iter()
        .filter_map(|card| {
            card.owner
                .filter(|&owner| owner != player)
                .map(|owner| (owner, card.id))
        })
        .collect()
}

/// Three players with all-correct guess sets submitted; phase is score.
pub fn scoring_game() -> GameSession {
    let mut game = guessing_game();
    let ids: Vec<PlayerId> = game.players.iter().map(|p| p.id).collect();
    for id in ids {
        let guesses = correct_guesses_for(&game, id);
        game.submit_guesses(id, guesses).unwrap();
    }
    game
}

/// Drives a score-phase game through every reveal back to wait-for-ready.
pub fn reveal_all(game: &mut GameSession) {
    while let Some(owner) = game.cursor_card().and_then(|card| card.owner) {
        game.mark_scored(owner).unwrap();
    }
}
