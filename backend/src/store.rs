//! Game record store contract and its in-memory implementation.
//!
//! The store is the durable source of seat assignment: the coordinator
//! re-reads the record on every command rather than caching seats, so a
//! seat cleared by Leave is immediately visible to the next Connect.

use crate::error::SessionError;
use async_trait::async_trait;
use chess_core::{Color, Game};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use shared::GameId;
use std::sync::atomic::{AtomicU32, Ordering};

/// One stored game: its two seats and the engine state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub id: GameId,
    pub name: String,
    pub white_seat: Option<String>,
    pub black_seat: Option<String>,
    pub game: Game,
}

impl GameRecord {
    /// The seat color held by `username`, `None` for observers.
    pub fn seat_of(&self, username: &str) -> Option<Color> {
        if self.white_seat.as_deref() == Some(username) {
            Some(Color::White)
        } else if self.black_seat.as_deref() == Some(username) {
            Some(Color::Black)
        } else {
            None
        }
    }
}

/// Lookup and mutation contract for game records.
#[async_trait]
pub trait GameStore: Send + Sync {
    async fn get(&self, id: GameId) -> Result<GameRecord, SessionError>;

    /// Assign or clear a seat. `None` frees it for a later joiner.
    async fn set_seat(
        &self,
        id: GameId,
        color: Color,
        username: Option<String>,
    ) -> Result<(), SessionError>;

    /// Persist the engine state after a committed move, resignation or
    /// terminal detection.
    async fn persist_state(&self, id: GameId, game: &Game) -> Result<(), SessionError>;
}

/// Record table held in memory, for tests and single-process deployments.
#[derive(Default)]
pub struct MemoryGameStore {
    games: DashMap<GameId, GameRecord>,
    next_id: AtomicU32,
}

impl MemoryGameStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fresh game with empty seats and a standard setup.
    pub fn create(&self, name: &str) -> GameId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        self.games.insert(
            id,
            GameRecord {
                id,
                name: name.to_string(),
                white_seat: None,
                black_seat: None,
                game: Game::new(),
            },
        );
        id
    }
}

#[async_trait]
impl GameStore for MemoryGameStore {
    async fn get(&self, id: GameId) -> Result<GameRecord, SessionError> {
        self.games
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or(SessionError::GameNotFound(id))
    }

    async fn set_seat(
        &self,
        id: GameId,
        color: Color,
        username: Option<String>,
    ) -> Result<(), SessionError> {
        let mut record = self.games.get_mut(&id).ok_or(SessionError::GameNotFound(id))?;
        match color {
            Color::White => record.white_seat = username,
            Color::Black => record.black_seat = username,
        }
        Ok(())
    }

    async fn persist_state(&self, id: GameId, game: &Game) -> Result<(), SessionError> {
        let mut record = self.games.get_mut(&id).ok_or(SessionError::GameNotFound(id))?;
        record.game = game.clone();
        Ok(())
    }
}
