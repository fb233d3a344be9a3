use std::collections::BTreeMap;
use std::sync::Arc;

use rand::seq::SliceRandom;
use tracing::info;

use game_types::{CardId, GameError, GamePhase, PlayerAction, PlayerId};

use crate::supply::{self, CardDeck};
use crate::token::generate_token;

/// A round cannot start with fewer joined players than this.
pub const MIN_PLAYERS: usize = 3;

const NAME_MIN_CHARS: usize = 2;
const NAME_MAX_CHARS: usize = 16;

/// A player's privately dealt clue for the round. Its id doubles as the id
/// of that player's real card once the deck is laid out.
#[derive(Debug, Clone)]
pub struct PromptCard {
    pub id: CardId,
    pub text: String,
}

/// One entry of the round's guessable deck. Decoys have no owner.
#[derive(Debug, Clone)]
pub struct Card {
    pub id: CardId,
    pub owner: Option<PlayerId>,
    /// Points the owner earned on this card, filled in at reveal.
    pub score: u32,
    pub revealed: bool,
}

impl Card {
    pub fn is_decoy(&self) -> bool {
        self.owner.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    pub id: PlayerId,
    /// Secret; authenticates this player's actions.
    pub token: String,
    pub name: String,
    pub is_ready: bool,
    /// The round's hand; empty until dealt.
    pub letters: String,
    pub word: Option<String>,
    pub prompt_card: Option<PromptCard>,
    /// Guessed-player id -> card id. Only ever holds a complete, validated
    /// set; cleared at round end.
    pub guesses: BTreeMap<PlayerId, CardId>,
    pub score_total: u32,
    pub score_own_words: u32,
    pub score_correct_guesses: u32,
}

impl Player {
    fn new(id: PlayerId, token: String, name: String) -> Self {
        Self {
            id,
            token,
            name,
            is_ready: false,
            letters: String::new(),
            word: None,
            prompt_card: None,
            guesses: BTreeMap::new(),
            score_total: 0,
            score_own_words: 0,
            score_correct_guesses: 0,
        }
    }

    /// Whether this player has handed in their guess set this round.
    pub fn all_words_assigned(&self) -> bool {
        !self.guesses.is_empty()
    }

    fn reset_for_next_round(&mut self) {
        self.is_ready = false;
        self.letters.clear();
        self.word = None;
        self.prompt_card = None;
        self.guesses.clear();
    }
}

/// Full mutable state of one in-progress game. Every operation below is
/// all-or-nothing: a validation or forbidden-action failure leaves the
/// session exactly as it was.
#[derive(Debug)]
pub struct GameSession {
    pub token: String,
    pub phase: GamePhase,
    pub round: u32,
    /// Join order; a player's id equals their index here.
    pub players: Vec<Player>,
    /// The round's deck; empty outside assign-words and score.
    pub cards: Vec<Card>,
    reveal_order: Vec<CardId>,
    currently_scored: Option<usize>,
    deck: Arc<CardDeck>,
    undrawn_prompts: Vec<usize>,
    next_card_id: CardId,
    spare_card_ids: Vec<CardId>,
}

impl GameSession {
    pub fn new(token: String, deck: Arc<CardDeck>) -> Self {
        Self {
            token,
            phase: GamePhase::WaitForReady,
            round: 1,
            players: Vec::new(),
            cards: Vec::new(),
            reveal_order: Vec::new(),
            currently_scored: None,
            deck,
            undrawn_prompts: Vec::new(),
            next_card_id: 1,
            spare_card_ids: Vec::new(),
        }
    }

    pub fn player_by_token(&self, token: &str) -> Option<PlayerId> {
        self.players.iter().find(|p| p.token == token).map(|p| p.id)
    }

    /// Player names in join order.
    pub fn roster(&self) -> Vec<String> {
        self.players.iter().map(|p| p.name.clone()).collect()
    }

    fn player(&self, id: PlayerId) -> Result<&Player, GameError> {
        self.players.get(id as usize).ok_or(GameError::PlayerNotFound)
    }

    /// Adds a player and returns their freshly issued secret token. Only
    /// possible before the first round starts.
    pub fn join(&mut self, name: &str) -> Result<String, GameError> {
        if !self.phase.allows(PlayerAction::Join) || self.round > 1 {
            return Err(GameError::JoinClosed);
        }
        validate_player_name(name)?;
        if self.players.iter().any(|p| p.name == name) {
            return Err(GameError::NameTaken);
        }
        let mut token = generate_token();
        while self.players.iter().any(|p| p.token == token) {
            token = generate_token();
        }
        let id = self.players.len() as PlayerId;
        self.players.push(Player::new(id, token.clone(), name.to_string()));
        // The start predicate is re-evaluated on every join as well as on
        // every ready toggle; a fresh joiner is never ready, so a join can
        // only defer the start.
        self.try_start_round();
        Ok(token)
    }

    /// Marks a player ready. A second ready call is an error, not a no-op.
    pub fn mark_ready(&mut self, player: PlayerId) -> Result<(), GameError> {
        if !self.phase.allows(PlayerAction::MarkReady) {
            return Err(GameError::WrongPhase);
        }
        if self.player(player)?.is_ready {
            return Err(GameError::AlreadyReady);
        }
        self.players[player as usize].is_ready = true;
        self.try_start_round();
        Ok(())
    }

    fn try_start_round(&mut self) {
        if self.players.len() < MIN_PLAYERS || !self.players.iter().all(|p| p.is_ready) {
            return;
        }
        let count = self.players.len();
        // One card-id block per round, shuffled so an id carries no hint of
        // who authored what. The first half becomes prompt-card ids, the
        // rest is reserved for the decoys laid out at deck build.
        let mut ids: Vec<CardId> =
            (self.next_card_id..self.next_card_id + 2 * count as CardId).collect();
        self.next_card_id += 2 * count as CardId;
        ids.shuffle(&mut rand::thread_rng());
        let texts: Vec<String> = (0..count).map(|_| self.draw_prompt()).collect();
        let (prompt_ids, decoy_ids) = ids.split_at(count);
        for ((player, &card_id), text) in
            self.players.iter_mut().zip(prompt_ids).zip(texts)
        {
            player.letters = supply::deal_hand();
            player.prompt_card = Some(PromptCard { id: card_id, text });
        }
        self.spare_card_ids = decoy_ids.to_vec();
        self.phase = GamePhase::SubmitWord;
        info!(game = %self.token, round = self.round, players = count, "all players ready, hands dealt");
    }

    fn draw_prompt(&mut self) -> String {
        if self.undrawn_prompts.is_empty() {
            // Reshuffle the whole deck once a game has seen every prompt.
            self.undrawn_prompts = (0..self.deck.len()).collect();
            self.undrawn_prompts.shuffle(&mut rand::thread_rng());
        }
        match self.undrawn_prompts.pop() {
            Some(index) => self.deck.text(index).to_string(),
            None => String::new(),
        }
    }

    /// Stores a player's word for the round. Resubmitting before the phase
    /// closes overwrites the previous word.
    pub fn submit_word(&mut self, player: PlayerId, word: &str) -> Result<(), GameError> {
        if !self.phase.allows(PlayerAction::SubmitWord) {
            return Err(GameError::WrongPhase);
        }
        validate_word(word, &self.player(player)?.letters)?;
        self.players[player as usize].word = Some(word.to_string());
        self.try_close_words();
        Ok(())
    }

    fn try_close_words(&mut self) {
        if !self.players.iter().all(|p| p.word.is_some()) {
            return;
        }
        let mut cards: Vec<Card> = Vec::with_capacity(self.players.len() * 2);
        for player in &self.players {
            if let Some(prompt) = &player.prompt_card {
                cards.push(Card {
                    id: prompt.id,
                    owner: Some(player.id),
                    score: 0,
                    revealed: false,
                });
            }
        }
        cards.extend(self.spare_card_ids.drain(..).map(|id| Card {
            id,
            owner: None,
            score: 0,
            revealed: false,
        }));
        cards.sort_by_key(|card| card.id);
        self.cards = cards;
        self.phase = GamePhase::AssignWords;
        info!(game = %self.token, round = self.round, cards = self.cards.len(), "all words in, deck laid out");
    }

    /// Accepts a player's complete guess set: exactly one existing,
    /// non-own card per other player, no card used twice.
    pub fn submit_guesses(
        &mut self,
        player: PlayerId,
        guesses: BTreeMap<PlayerId, CardId>,
    ) -> Result<(), GameError> {
        if !self.phase.allows(PlayerAction::SubmitGuesses) {
            return Err(GameError::WrongPhase);
        }
        let submitter = self.player(player)?;
        if submitter.all_words_assigned() {
            return Err(GameError::GuessesAlreadySubmitted);
        }
        if guesses.len() != self.players.len() - 1 {
            return Err(GameError::WrongGuessCount);
        }
        if guesses.contains_key(&player) {
            return Err(GameError::SelfGuess);
        }
        let own_card = submitter.prompt_card.as_ref().map(|card| card.id);
        let mut used: Vec<CardId> = Vec::with_capacity(guesses.len());
        for (&target, &card_id) in &guesses {
            if self.players.get(target as usize).is_none() {
                return Err(GameError::UnknownGuessTarget);
            }
            if !self.cards.iter().any(|card| card.id == card_id) {
                return Err(GameError::InvalidCard);
            }
            if Some(card_id) == own_card {
                return Err(GameError::OwnCardGuess);
            }
            if used.contains(&card_id) {
                return Err(GameError::DuplicateCard);
            }
            used.push(card_id);
        }
        self.players[player as usize].guesses = guesses;
        self.try_begin_scoring();
        Ok(())
    }

    fn try_begin_scoring(&mut self) {
        if !self.players.iter().all(|p| p.all_words_assigned()) {
            return;
        }
        // Real cards reveal in id order; ids were shuffled at deal time, so
        // the rotation is not predictable from join order.
        let mut order: Vec<CardId> = self
            .cards
            .iter()
            .filter(|card| !card.is_decoy())
            .map(|card| card.id)
            .collect();
        order.sort_unstable();
        self.reveal_order = order;
        self.currently_scored = Some(0);
        self.phase = GamePhase::Score;
        info!(game = %self.token, round = self.round, "all guesses in, reveal begins");
    }

    /// The caller's own stored guesses; readable only while the guessing
    /// phase is open.
    pub fn guesses_of(&self, player: PlayerId) -> Result<BTreeMap<PlayerId, CardId>, GameError> {
        if !self.phase.allows(PlayerAction::ReadGuesses) {
            return Err(GameError::WrongPhase);
        }
        Ok(self.player(player)?.guesses.clone())
    }

    /// The card currently eligible for disclosure, while the round is in
    /// the score phase.
    pub fn cursor_card(&self) -> Option<&Card> {
        let index = self.currently_scored?;
        let card_id = *self.reveal_order.get(index)?;
        self.cards.iter().find(|card| card.id == card_id)
    }

    /// Reveals the cursor card and applies scoring. Only the card's owner
    /// may advance the reveal; the last reveal closes the round.
    pub fn mark_scored(&mut self, player: PlayerId) -> Result<(), GameError> {
        if !self.phase.allows(PlayerAction::MarkScored) {
            return Err(GameError::WrongPhase);
        }
        self.player(player)?;
        let (card_id, owner) = match self.cursor_card() {
            Some(card) => (card.id, card.owner),
            None => return Err(GameError::WrongPhase),
        };
        if owner != Some(player) {
            return Err(GameError::NotYourTurn);
        }
        self.apply_reveal(card_id, player);
        self.advance_cursor();
        Ok(())
    }

    fn apply_reveal(&mut self, card_id: CardId, owner: PlayerId) {
        let mut correct = 0;
        for guesser in &mut self.players {
            if guesser.id == owner {
                continue;
            }
            if guesser.guesses.get(&owner) == Some(&card_id) {
                guesser.score_correct_guesses += 1;
                guesser.score_total += 1;
                correct += 1;
            }
        }
        let card_owner = &mut self.players[owner as usize];
        card_owner.score_own_words += correct;
        card_owner.score_total += correct;
        if let Some(card) = self.cards.iter_mut().find(|card| card.id == card_id) {
            card.revealed = true;
            card.score = correct;
        }
    }

    fn advance_cursor(&mut self) {
        let next = self.currently_scored.map_or(0, |index| index + 1);
        if next < self.reveal_order.len() {
            self.currently_scored = Some(next);
        } else {
            self.finish_round();
        }
    }

    fn finish_round(&mut self) {
        self.round += 1;
        self.cards.clear();
        self.reveal_order.clear();
        self.currently_scored = None;
        self.spare_card_ids.clear();
        for player in &mut self.players {
            player.reset_for_next_round();
        }
        self.phase = GamePhase::WaitForReady;
        info!(game = %self.token, round = self.round, "round complete, waiting for ready");
    }
}

fn validate_player_name(name: &str) -> Result<(), GameError> {
    let count = name.chars().count();
    if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&count) {
        return Err(GameError::InvalidPlayerName);
    }
    let first = name.chars().next();
    let last = name.chars().last();
    if first.is_none_or(char::is_whitespace) || last.is_none_or(char::is_whitespace) {
        return Err(GameError::InvalidPlayerName);
    }
    // Interior whitespace other than a plain space is also rejected.
    if !name.chars().all(|c| c == ' ' || !c.is_whitespace()) {
        return Err(GameError::InvalidPlayerName);
    }
    Ok(())
}

/// A word is valid when its characters form a sub-multiset of the hand.
fn validate_word(word: &str, letters: &str) -> Result<(), GameError> {
    if word.is_empty() {
        return Err(GameError::EmptyWord);
    }
    if word.chars().count() > letters.chars().count() {
        return Err(GameError::WordTooLong);
    }
    let mut available: Vec<char> = letters.chars().collect();
    for ch in word.chars() {
        match available.iter().position(|&a| a == ch) {
            Some(index) => {
                available.swap_remove(index);
            }
            None => return Err(GameError::LetterNotInHand),
        }
    }
    Ok(())
}
