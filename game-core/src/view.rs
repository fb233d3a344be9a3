use std::collections::BTreeMap;

use game_types::{
    BoardView, CardId, CardView, CurrentlyScoredView, GamePhase, PlayerId, PlayerView,
    PromptCardView, SelfView,
};

use crate::session::GameSession;

/// Renders the requesting player's perspective of a game. Pure projection:
/// never mutates session state, computed fresh per request. All redaction
/// ("is_self", hidden ownership, other players' unplayed words) lives here.
pub fn project(game: &GameSession, viewer: PlayerId) -> BoardView {
    // Words and the deck become public knowledge once guessing starts.
    let words_public = matches!(game.phase, GamePhase::AssignWords | GamePhase::Score);

    let players = game
        .players
        .iter()
        .map(|player| {
            let is_self = player.id == viewer;
            PlayerView {
                id: player.id,
                name: player.name.clone(),
                is_ready: player.is_ready,
                is_self,
                letters: player.letters.clone(),
                word: if is_self || words_public {
                    player.word.clone()
                } else {
                    None
                },
                all_words_assigned: words_public.then(|| player.all_words_assigned()),
                score_total: player.score_total,
                score_own_words: player.score_own_words,
                score_correct_guesses: player.score_correct_guesses,
            }
        })
        .collect();

    let own = game.players.get(viewer as usize);
    let self_view = SelfView {
        card: own
            .and_then(|player| player.prompt_card.as_ref())
            .map(|card| PromptCardView {
                id: card.id,
                text: card.text.clone(),
            }),
        letters: own.map(|player| player.letters.clone()).unwrap_or_default(),
        is_ready: own.map(|player| player.is_ready).unwrap_or(false),
        word: own.and_then(|player| player.word.clone()),
    };

    let cards = words_public.then(|| {
        game.cards
            .iter()
            .map(|card| {
                let is_self = card.owner == Some(viewer);
                CardView {
                    id: card.id,
                    is_self,
                    // Ownership stays hidden until the reveal, except on the
                    // viewer's own card.
                    player_id: if card.revealed || is_self { card.owner } else { None },
                    score: card.revealed.then_some(card.score),
                }
            })
            .collect()
    });

    let currently_scored = game.cursor_card().and_then(|card| {
        let owner = card.owner?;
        let owner_player = game.players.get(owner as usize)?;
        let guesses: BTreeMap<PlayerId, CardId> = game
            .players
            .iter()
            .filter(|player| player.id != owner)
            .filter_map(|player| player.guesses.get(&owner).map(|&card_id| (player.id, card_id)))
            .collect();
        Some(CurrentlyScoredView {
            player_id: owner,
            word: owner_player.word.clone().unwrap_or_default(),
            guesses,
        })
    });

    BoardView {
        phase: game.phase,
        round: game.round,
        scoreboard_order: scoreboard_order(game),
        own: self_view,
        players,
        cards,
        currently_scored,
    }
}

/// Player ids ranked by total, then own-word points, then correct guesses,
/// with join order as the final tie-break.
pub fn scoreboard_order(game: &GameSession) -> Vec<PlayerId> {
    let mut ids: Vec<PlayerId> = game.players.iter().map(|p| p.id).collect();
    ids.sort_by(|&a, &b| {
        let pa = &game.players[a as usize];
        let pb = &game.players[b as usize];
        pb.score_total
            .cmp(&pa.score_total)
            .then(pb.score_own_words.cmp(&pa.score_own_words))
            .then(pb.score_correct_guesses.cmp(&pa.score_correct_guesses))
            .then(a.cmp(&b))
    });
    ids
}
