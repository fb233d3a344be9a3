use std::sync::Arc;

use anyhow::{Context, bail};
use base64::Engine;
use serde::Serialize;
use warp::Filter;
use warp::http::StatusCode;

use game_core::view::project;
use game_core::{CardDeck, GameSession};
use game_types::{
    ErrorKind, ErrorResponse, GameError, GuessesResponse, JoinGameRequest, PlayerId,
    PlayerJoinedResponse, PlayerListResponse, SubmitGuessesRequest, SubmitWordRequest,
};

use crate::registry::SessionRegistry;

pub mod config;
pub mod registry;

type ApiReply = warp::reply::WithStatus<warp::reply::Json>;

pub fn create_routes(
    registry: Arc<SessionRegistry>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let registry_filter = warp::any().map({
        let registry = registry.clone();
        move || registry.clone()
    });

    let create_game = warp::path!("api" / "games")
        .and(warp::post())
        .and(warp::body::json())
        .and(registry_filter.clone())
        .and_then(handle_create_game);

    let list_players = warp::path!("api" / "games" / String / "players")
        .and(warp::get())
        .and(registry_filter.clone())
        .and_then(handle_list_players);

    let join_game = warp::path!("api" / "games" / String / "players")
        .and(warp::post())
        .and(warp::body::json())
        .and(registry_filter.clone())
        .and_then(handle_join_game);

    let mark_ready = warp::path!("api" / "games" / String / "players" / String / "ready")
        .and(warp::put())
        .and(registry_filter.clone())
        .and_then(handle_mark_ready);

    let get_board = warp::path!("api" / "games" / String / "players" / String)
        .and(warp::get())
        .and(registry_filter.clone())
        .and_then(handle_get_board);

    let submit_word = warp::path!("api" / "games" / String / "players" / String / "word")
        .and(warp::put())
        .and(warp::body::json())
        .and(registry_filter.clone())
        .and_then(handle_submit_word);

    let submit_guesses = warp::path!("api" / "games" / String / "players" / String / "guesses")
        .and(warp::put())
        .and(warp::body::json())
        .and(registry_filter.clone())
        .and_then(handle_submit_guesses);

    let get_guesses = warp::path!("api" / "games" / String / "players" / String / "guesses")
        .and(warp::get())
        .and(registry_filter.clone())
        .and_then(handle_get_guesses);

    let mark_scored = warp::path!("api" / "games" / String / "players" / String / "scored")
        .and(warp::put())
        .and(registry_filter)
        .and_then(handle_mark_scored);

    create_game
        .or(join_game)
        .or(list_players)
        .or(mark_ready)
        .or(submit_word)
        .or(submit_guesses)
        .or(get_guesses)
        .or(mark_scored)
        .or(get_board)
        .with(warp::log("word_party"))
}

/// Loads the prompt deck from a base64-encoded, newline-separated card
/// list, or falls back to the built-in deck when no path is configured.
pub fn load_card_deck(path: Option<&str>) -> anyhow::Result<CardDeck> {
    let deck = match path {
        Some(path) => {
            let raw =
                std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
            // The on-disk format is base64 of the whole list, so the card
            // texts stay out of casual greps and search indexes.
            let stripped: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
            let decoded = base64::engine::general_purpose::STANDARD
                .decode(stripped.as_bytes())
                .context("decoding card list")?;
            let text = String::from_utf8(decoded).context("card list is not valid UTF-8")?;
            CardDeck::from_text(&text)
        }
        None => CardDeck::builtin(),
    };
    if deck.is_empty() {
        bail!("card deck contains no usable prompts");
    }
    Ok(deck)
}

fn json_reply<T: Serialize>(value: &T, status: StatusCode) -> ApiReply {
    warp::reply::with_status(warp::reply::json(value), status)
}

fn error_reply(err: GameError) -> ApiReply {
    let status = match err.kind() {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::Forbidden => StatusCode::FORBIDDEN,
    };
    json_reply(&ErrorResponse { error: err.to_string() }, status)
}

/// Bodiless successes answer `200` with JSON `null`.
fn ok_reply() -> ApiReply {
    json_reply(&(), StatusCode::OK)
}

/// Resolves game and player tokens, then runs one operation under the
/// session's lock. Token resolution failures map to 404 before the
/// operation is ever looked at.
async fn with_player<F>(
    registry: &SessionRegistry,
    game_token: &str,
    player_token: &str,
    op: F,
) -> ApiReply
where
    F: FnOnce(&mut GameSession, PlayerId) -> ApiReply,
{
    match registry.find(game_token).await {
        Some(session) => {
            let mut game = session.lock().await;
            match game.player_by_token(player_token) {
                Some(player) => op(&mut game, player),
                None => error_reply(GameError::PlayerNotFound),
            }
        }
        None => error_reply(GameError::GameNotFound),
    }
}

async fn handle_create_game(
    request: JoinGameRequest,
    registry: Arc<SessionRegistry>,
) -> Result<ApiReply, warp::Rejection> {
    Ok(match registry.create_game(&request.player_name).await {
        Ok(created) => json_reply(&created, StatusCode::CREATED),
        Err(err) => error_reply(err),
    })
}

async fn handle_list_players(
    game_token: String,
    registry: Arc<SessionRegistry>,
) -> Result<ApiReply, warp::Rejection> {
    Ok(match registry.find(&game_token).await {
        Some(session) => {
            let game = session.lock().await;
            json_reply(
                &PlayerListResponse { players: game.roster() },
                StatusCode::OK,
            )
        }
        None => error_reply(GameError::GameNotFound),
    })
}

async fn handle_join_game(
    game_token: String,
    request: JoinGameRequest,
    registry: Arc<SessionRegistry>,
) -> Result<ApiReply, warp::Rejection> {
    Ok(match registry.find(&game_token).await {
        Some(session) => {
            let mut game = session.lock().await;
            match game.join(&request.player_name) {
                Ok(player_token) => {
                    json_reply(&PlayerJoinedResponse { player_token }, StatusCode::CREATED)
                }
                Err(err) => error_reply(err),
            }
        }
        None => error_reply(GameError::GameNotFound),
    })
}

async fn handle_mark_ready(
    game_token: String,
    player_token: String,
    registry: Arc<SessionRegistry>,
) -> Result<ApiReply, warp::Rejection> {
    Ok(with_player(&registry, &game_token, &player_token, |game, player| {
        match game.mark_ready(player) {
            Ok(()) => ok_reply(),
            Err(err) => error_reply(err),
        }
    })
    .await)
}

async fn handle_get_board(
    game_token: String,
    player_token: String,
    registry: Arc<SessionRegistry>,
) -> Result<ApiReply, warp::Rejection> {
    Ok(with_player(&registry, &game_token, &player_token, |game, player| {
        json_reply(&project(game, player), StatusCode::OK)
    })
    .await)
}

async fn handle_submit_word(
    game_token: String,
    player_token: String,
    request: SubmitWordRequest,
    registry: Arc<SessionRegistry>,
) -> Result<ApiReply, warp::Rejection> {
    Ok(with_player(&registry, &game_token, &player_token, |game, player| {
        match game.submit_word(player, &request.word) {
            Ok(()) => ok_reply(),
            Err(err) => error_reply(err),
        }
    })
    .await)
}

async fn handle_submit_guesses(
    game_token: String,
    player_token: String,
    request: SubmitGuessesRequest,
    registry: Arc<SessionRegistry>,
) -> Result<ApiReply, warp::Rejection> {
    Ok(with_player(&registry, &game_token, &player_token, |game, player| {
        match game.submit_guesses(player, request.guesses) {
            Ok(()) => ok_reply(),
            Err(err) => error_reply(err),
        }
    })
    .await)
}

async fn handle_get_guesses(
    game_token: String,
    player_token: String,
    registry: Arc<SessionRegistry>,
) -> Result<ApiReply, warp::Rejection> {
    Ok(with_player(&registry, &game_token, &player_token, |game, player| {
        match game.guesses_of(player) {
            Ok(guesses) => json_reply(&GuessesResponse { guesses }, StatusCode::OK),
            Err(err) => error_reply(err),
        }
    })
    .await)
}

async fn handle_mark_scored(
    game_token: String,
    player_token: String,
    registry: Arc<SessionRegistry>,
) -> Result<ApiReply, warp::Rejection> {
    Ok(with_player(&registry, &game_token, &player_token, |game, player| {
        match game.mark_scored(player) {
            Ok(()) => ok_reply(),
            Err(err) => error_reply(err),
        }
    })
    .await)
}
