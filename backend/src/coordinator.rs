//! The session coordinator: one live game's multi-party protocol.
//!
//! Invoked once per inbound command, potentially concurrently across
//! connections and games. Per-game commands that read-check-apply-persist
//! (MakeMove, Resign, Leave) serialize on a per-game async mutex so two
//! concurrent moves can never both pass the turn check against a stale
//! read; unrelated games proceed in parallel. All command failures become
//! an `Error` event for the sender alone.

use crate::auth::AuthLookup;
use crate::error::SessionError;
use crate::registry::{ConnectionRegistry, EventSink};
use crate::store::GameStore;
use chess_core::{Color, Game, Move};
use dashmap::DashMap;
use shared::{ClientCommand, GameId, ServerEvent};
use std::sync::Arc;
use tokio::sync::Mutex;

pub struct SessionCoordinator {
    registry: Arc<ConnectionRegistry>,
    auth: Arc<dyn AuthLookup>,
    store: Arc<dyn GameStore>,
    game_locks: DashMap<GameId, Arc<Mutex<()>>>,
}

impl SessionCoordinator {
    /// Collaborators are constructor-injected; the coordinator owns its
    /// registry, so independent instances never interfere.
    pub fn new(auth: Arc<dyn AuthLookup>, store: Arc<dyn GameStore>) -> Self {
        SessionCoordinator {
            registry: Arc::new(ConnectionRegistry::new()),
            auth,
            store,
            game_locks: DashMap::new(),
        }
    }

    pub fn registry(&self) -> &ConnectionRegistry {
        &self.registry
    }

    /// Decode a raw JSON frame and handle it. Malformed input is answered
    /// with an `Error` event like any other rejected command.
    pub async fn handle_raw(&self, raw: &str, sink: &EventSink) {
        match ClientCommand::from_json(raw) {
            Ok(cmd) => self.handle(cmd, sink).await,
            Err(err) => {
                let _ = sink.send(ServerEvent::Error {
                    message: SessionError::from(err).to_string(),
                });
            }
        }
    }

    /// Handle one decoded command from the connection behind `sink`.
    pub async fn handle(&self, cmd: ClientCommand, sink: &EventSink) {
        let result = match cmd {
            ClientCommand::Connect {
                auth_token,
                game_id,
            } => self.connect(&auth_token, game_id, sink).await,
            ClientCommand::MakeMove {
                auth_token,
                game_id,
                mv,
            } => self.make_move(&auth_token, game_id, mv).await,
            ClientCommand::Resign {
                auth_token,
                game_id,
            } => self.resign(&auth_token, game_id).await,
            ClientCommand::Leave {
                auth_token,
                game_id,
            } => self.leave(&auth_token, game_id).await,
        };

        // Local recovery: the sender hears about the failure, nobody else.
        if let Err(err) = result {
            tracing::debug!(error = %err, "command rejected");
            let _ = sink.send(ServerEvent::Error {
                message: err.to_string(),
            });
        }
    }

    async fn connect(
        &self,
        token: &str,
        game_id: GameId,
        sink: &EventSink,
    ) -> Result<(), SessionError> {
        let username = self.auth.resolve(token).await?;
        let record = self.store.get(game_id).await?;

        self.registry.register(&username, game_id, sink.clone());
        // Routed through the registry so a joiner whose channel already
        // closed is pruned right here instead of lingering until the next
        // broadcast.
        self.registry.send_to(
            &username,
            ServerEvent::LoadGame {
                game: record.game.clone(),
            },
        );

        let message = match record.seat_of(&username) {
            Some(color) => format!("{username} joined the game as {color}"),
            None => format!("{username} is now observing the game"),
        };
        tracing::info!(%username, game_id, "connected");
        self.registry.broadcast(
            game_id,
            &ServerEvent::Notification { message },
            &[&username],
        );
        Ok(())
    }

    async fn make_move(
        &self,
        token: &str,
        game_id: GameId,
        mv: Move,
    ) -> Result<(), SessionError> {
        let username = self.auth.resolve(token).await?;
        let lock = self.lock_for(game_id);
        let _guard = lock.lock().await;

        let record = self.store.get(game_id).await?;
        let seat = record.seat_of(&username).ok_or_else(|| {
            SessionError::Authorization("observers cannot make moves".to_string())
        })?;
        if record.game.is_over() {
            return Err(SessionError::GameOver);
        }
        if seat != record.game.turn() {
            return Err(SessionError::Authorization("it's not your turn".to_string()));
        }

        let mut game = record.game;
        game.make_move(mv)?;
        let outcome = Self::outcome_notice(&mut game);
        self.store.persist_state(game_id, &game).await?;
        tracing::info!(%username, game_id, %mv, "move committed");

        self.registry.broadcast(
            game_id,
            &ServerEvent::Notification {
                message: format!("{username} moved {mv}"),
            },
            &[&username],
        );
        self.registry
            .broadcast(game_id, &ServerEvent::LoadGame { game }, &[]);
        if let Some(message) = outcome {
            self.registry
                .broadcast(game_id, &ServerEvent::Notification { message }, &[]);
        }
        Ok(())
    }

    async fn resign(&self, token: &str, game_id: GameId) -> Result<(), SessionError> {
        let username = self.auth.resolve(token).await?;
        let lock = self.lock_for(game_id);
        let _guard = lock.lock().await;

        let record = self.store.get(game_id).await?;
        if record.game.is_over() {
            return Err(SessionError::GameOver);
        }
        if record.seat_of(&username).is_none() {
            return Err(SessionError::Authorization(
                "observers cannot resign".to_string(),
            ));
        }

        let mut game = record.game;
        game.set_over();
        self.store.persist_state(game_id, &game).await?;
        tracing::info!(%username, game_id, "resigned");

        // The resigning player hears it too.
        self.registry.broadcast(
            game_id,
            &ServerEvent::Notification {
                message: format!("{username} has resigned. Game over."),
            },
            &[],
        );
        Ok(())
    }

    async fn leave(&self, token: &str, game_id: GameId) -> Result<(), SessionError> {
        let username = self.auth.resolve(token).await?;
        let lock = self.lock_for(game_id);
        let _guard = lock.lock().await;

        let record = self.store.get(game_id).await?;
        if let Some(color) = record.seat_of(&username) {
            // Free the seat so a later Connect can claim it.
            self.store.set_seat(game_id, color, None).await?;
        }
        tracing::info!(%username, game_id, "left");

        self.registry.broadcast(
            game_id,
            &ServerEvent::Notification {
                message: format!("{username} left the game"),
            },
            &[&username],
        );
        self.registry.remove(&username);
        Ok(())
    }

    /// Terminal/check detection after a committed move. Checkmate and
    /// stalemate end the game; a bare check only produces a notification.
    fn outcome_notice(game: &mut Game) -> Option<String> {
        if game.is_in_checkmate(Color::White) {
            game.set_over();
            Some("White is in checkmate. Black wins!".to_string())
        } else if game.is_in_checkmate(Color::Black) {
            game.set_over();
            Some("Black is in checkmate. White wins!".to_string())
        } else if game.is_in_stalemate(game.turn()) {
            game.set_over();
            Some("Stalemate. Game over.".to_string())
        } else if game.is_in_check(Color::White) {
            Some("White is in check.".to_string())
        } else if game.is_in_check(Color::Black) {
            Some("Black is in check.".to_string())
        } else {
            None
        }
    }

    /// One mutual-exclusion domain per live game. The Arc is cloned out so
    /// no dashmap shard lock is held across an await.
    fn lock_for(&self, game_id: GameId) -> Arc<Mutex<()>> {
        self.game_locks
            .entry(game_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
